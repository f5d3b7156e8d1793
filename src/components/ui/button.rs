use super::spinner::{Spinner, SpinnerSize};
use leptos::prelude::*;

/// Primary full-width button. While `busy` is true it is disabled and shows an
/// inline spinner next to its label, so a request cannot be submitted twice.
#[component]
pub fn Button(
    #[prop(default = "button")] button_type: &'static str,
    #[prop(optional, into, default = Signal::from(false))] busy: Signal<bool>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type=button_type
            class="inline-flex items-center justify-center gap-2 text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:outline-none focus:ring-blue-300 font-medium rounded-lg text-sm w-full px-5 py-2.5 dark:bg-blue-600 dark:hover:bg-blue-700 dark:focus:ring-blue-800"
            class:cursor-not-allowed=move || busy.get()
            class:opacity-70=move || busy.get()
            disabled=move || busy.get()
            aria-busy=move || busy.get().to_string()
        >
            {move || busy.get().then(|| view! { <Spinner size=SpinnerSize::Small label="Working" /> })}
            {children()}
        </button>
    }
}
