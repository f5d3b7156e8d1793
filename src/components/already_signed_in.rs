use crate::{app_lib::config::AppConfig, app_lib::theme::Theme, features::auth::state::use_auth};
use leptos::prelude::*;
use leptos_router::components::A;

/// Renders the signed-in state for auth routes (login/signup/reset).
#[component]
pub fn AlreadySignedInPanel() -> impl IntoView {
    let auth = use_auth();
    let landing_path = AppConfig::load().landing_path;
    let user_name = Signal::derive(move || {
        auth.session.with(|state| {
            state
                .current_user
                .as_ref()
                .map(|user| user.display_name().to_string())
                .unwrap_or_default()
        })
    });

    view! {
        <div class="text-center space-y-6 py-4">
            <div class="flex justify-center">
                <div class="p-4 bg-blue-50 dark:bg-blue-900/20 rounded-full">
                    <span class="material-symbols-outlined text-4xl text-blue-600 dark:text-blue-400">
                        "account_circle"
                    </span>
                </div>
            </div>
            <div class="space-y-2">
                <h2 class="text-xl font-bold text-gray-900 dark:text-white">
                    "Already Signed In"
                </h2>
                <p class="text-gray-500 dark:text-gray-400">
                    "You are currently signed in as "
                    <span class="font-medium text-gray-900 dark:text-gray-200">
                        {move || user_name.get()}
                    </span> "."
                </p>
            </div>
            <div class="flex flex-col gap-3">
                <A
                    href=landing_path
                    {..}
                    class="w-full inline-flex justify-center items-center px-5 py-2.5 text-sm font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800 transition-all shadow-sm"
                >
                    "Continue"
                </A>
                <button type="button" on:click=move |_| auth.sign_out() class=Theme::BUTTON_SECONDARY>
                    "Sign Out"
                </button>
            </div>
        </div>
    }
}
