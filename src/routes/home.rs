use crate::features::auth::state::use_auth;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <section class="max-w-3xl mx-auto text-center space-y-8 py-12">
            <h1 class="text-4xl font-extrabold tracking-tight text-gray-900 md:text-5xl dark:text-white">
                "One front door for your account"
            </h1>
            <p class="text-lg text-gray-500 dark:text-gray-400">
                "Sign in, create an account, or recover access in a few steps. Sessions live in secure cookies and never in the page."
            </p>
            <div class="flex flex-col sm:flex-row justify-center gap-4">
                <Show
                    when=move || auth.is_authenticated.get()
                    fallback=|| {
                        view! {
                            <A
                                href=paths::SIGNUP
                                {..}
                                class="inline-flex justify-center items-center px-5 py-3 text-base font-medium text-white rounded-lg bg-blue-700 hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700"
                            >
                                "Get started"
                            </A>
                            <A
                                href=paths::LOGIN
                                {..}
                                class="inline-flex justify-center items-center px-5 py-3 text-base font-medium text-gray-900 rounded-lg border border-gray-300 hover:bg-gray-100 dark:text-white dark:border-gray-700 dark:hover:bg-gray-700"
                            >
                                "Sign in"
                            </A>
                        }
                    }
                >
                    <A
                        href=paths::DASHBOARD
                        {..}
                        class="inline-flex justify-center items-center px-5 py-3 text-base font-medium text-white rounded-lg bg-blue-700 hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700"
                    >
                        "Open dashboard"
                    </A>
                </Show>
            </div>
        </section>
    }
}
