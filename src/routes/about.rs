//! Build metadata for support requests.

use crate::app_lib::build_info;
use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="max-w-xl mx-auto space-y-4">
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"About"</h1>
            <p class="text-gray-500 dark:text-gray-400">
                "Gatehouse is the browser front end for account sign-in, registration, and password recovery."
            </p>
            <dl class="grid grid-cols-3 gap-2 text-sm">
                <dt class="font-medium text-gray-900 dark:text-white">"Version"</dt>
                <dd class="col-span-2 font-mono text-gray-600 dark:text-gray-300">
                    {build_info::version()}
                </dd>
                <dt class="font-medium text-gray-900 dark:text-white">"Commit"</dt>
                <dd class="col-span-2 font-mono text-gray-600 dark:text-gray-300">
                    {build_info::git_commit_hash()}
                </dd>
            </dl>
        </section>
    }
}
