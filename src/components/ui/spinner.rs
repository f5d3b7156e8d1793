use leptos::prelude::*;

#[derive(Clone, Copy, Default)]
pub enum SpinnerSize {
    /// Fits inside a button label.
    Small,
    #[default]
    Large,
}

/// Indeterminate progress indicator announced to screen readers as `label`.
#[component]
pub fn Spinner(
    #[prop(optional)] size: SpinnerSize,
    #[prop(default = "Loading")] label: &'static str,
) -> impl IntoView {
    let class = match size {
        SpinnerSize::Small => {
            "inline-block h-4 w-4 animate-spin rounded-full border-2 border-white/40 border-t-white"
        }
        SpinnerSize::Large => {
            "inline-block h-7 w-7 animate-spin rounded-full border-4 border-blue-200 border-t-blue-600"
        }
    };

    view! { <span class=class role="status" aria-live="polite" aria-label=label></span> }
}
