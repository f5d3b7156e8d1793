use leptos::prelude::*;

/// Title, optional subtitle, and a bordered card around the page content.
#[component]
pub fn AuthCard(
    title: &'static str,
    #[prop(optional)] subtitle: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-[70vh] flex items-center justify-center px-6 py-10">
            <div class="w-full max-w-md">
                <div class="mb-6 space-y-2 text-center">
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">{title}</h1>
                    {subtitle.map(|text| view! { <p class="text-sm text-gray-500 dark:text-gray-400">{text}</p> })}
                </div>
                <div class="rounded-2xl border border-gray-200 bg-white p-6 shadow-sm sm:p-8 dark:border-gray-700 dark:bg-gray-800">
                    {children()}
                </div>
            </div>
        </div>
    }
}
