//! Fallback page for unknown routes.

use crate::app_lib::theme::Theme;
use crate::components::AppShell;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

/// Renders the not-found content inside the shared shell.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    let go_back = move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Ok(history) = window.history() {
            let _ = history.back();
        }
    };

    view! {
        <AppShell>
            <div class="flex flex-col items-center justify-center min-h-[50vh] text-center px-4">
                <div class="relative">
                    <h1 class="text-9xl font-black text-gray-100 dark:text-gray-800 select-none">
                        "404"
                    </h1>
                    <p class="absolute top-1/2 left-1/2 -translate-x-1/2 -translate-y-1/2 text-2xl font-bold text-gray-900 dark:text-white whitespace-nowrap">
                        "Page not found"
                    </p>
                </div>
                <div class="mt-4 space-y-6">
                    <p class="text-gray-500 dark:text-gray-400 max-w-sm mx-auto">
                        "Nothing lives at this address."
                    </p>
                    <div class="flex flex-col sm:flex-row items-center justify-center gap-4">
                        <A
                            href=paths::HOME
                            {..}
                            class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700 transition-all"
                        >
                            "Go Home"
                        </A>
                        <button type="button" on:click=go_back class=Theme::BUTTON_SECONDARY>
                            "Go Back"
                        </button>
                    </div>
                </div>
            </div>
        </AppShell>
    }
}
