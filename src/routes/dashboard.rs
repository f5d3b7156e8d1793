use crate::features::auth::state::use_auth;
use leptos::prelude::*;

/// Landing page after sign-in. Only rendered behind `RequireAuth`.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let greeting = move || {
        auth.session.with(|state| {
            state
                .current_user
                .as_ref()
                .map(|user| format!("Welcome back, {}.", user.display_name()))
                .unwrap_or_default()
        })
    };

    view! {
        <section class="max-w-3xl mx-auto space-y-4">
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Dashboard"</h1>
            <p class="text-gray-600 dark:text-gray-300">{greeting}</p>
            <p class="text-sm text-gray-500 dark:text-gray-400">
                "Your session is active. Use the menu to sign out when you are done."
            </p>
        </section>
    }
}
