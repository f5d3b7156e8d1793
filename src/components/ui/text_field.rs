//! Labelled input bound to a form buffer, with its validation message rendered
//! below the control.

use crate::app_lib::theme::Theme;
use leptos::prelude::*;

#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "off")] autocomplete: &'static str,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    let error_id = format!("{id}-error");
    let described_by = error_id.clone();

    view! {
        <div>
            <label class=Theme::LABEL for=id>
                {label}
            </label>
            <input
                id=id
                type=input_type
                class=move || {
                    if error.with(Option::is_some) { Theme::INPUT_INVALID } else { Theme::INPUT }
                }
                autocomplete=autocomplete
                placeholder=placeholder
                aria-invalid=move || error.with(Option::is_some).to_string()
                aria-describedby=described_by
                prop:value=move || value.get()
                on:input=move |event| on_input.run(event_target_value(&event))
            />
            {move || {
                error
                    .get()
                    .map(|message| {
                        view! {
                            <p id=error_id.clone() class=Theme::FIELD_ERROR>
                                {message}
                            </p>
                        }
                    })
            }}
        </div>
    }
}
