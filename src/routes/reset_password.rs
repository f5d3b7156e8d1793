//! Password reset route: request form, then a confirmation that stays until
//! the visitor asks to send another email.

use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AuthCard, Button, TextField};
use crate::features::auth::{
    reset::{ResetController, ResetFlow, ResetPhase},
    state::use_auth,
    types::SessionState,
};
use crate::routes::paths;
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use leptos_router::components::A;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let flow = RwSignal::new(ResetFlow::default());
    let controller = StoredValue::new_local(ResetController::new(
        auth.store(),
        move |state: &ResetFlow| flow.set(state.clone()),
    ));
    auth.clear_error();

    let email = Signal::derive(move || flow.with(|state| state.form.email.clone()));
    let email_error = Signal::derive(move || {
        flow.with(|state| state.field_errors.get("email").map(str::to_string))
    });
    // Matches the controller guard: any request in flight blocks a submit.
    let busy = Signal::derive(move || auth.session.with(SessionState::operation_in_flight));
    let store_error = move || auth.session.with(|state| state.error.clone());
    let email_sent = move || flow.with(|state| state.phase == ResetPhase::EmailSent);
    let sent_to = move || flow.with(|state| state.sent_to.clone().unwrap_or_default());

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if let Some(task) = controller.try_with_value(ResetController::submit) {
            spawn_local(task);
        }
    };

    view! {
        <AuthCard title="Reset your password" subtitle="We will send you a link to choose a new one.">
            <Show
                when=email_sent
                fallback=move || {
                    view! {
                        <form class="space-y-5" on:submit=on_submit novalidate>
                            <TextField
                                id="email"
                                label="Email"
                                input_type="email"
                                autocomplete="email"
                                placeholder="name@example.com"
                                value=email
                                error=email_error
                                on_input=Callback::new(move |value: String| {
                                    controller.with_value(|controller| controller.set_email(value));
                                })
                            />
                            <Button button_type="submit" busy=busy>
                                "Send reset link"
                            </Button>
                            {move || {
                                store_error()
                                    .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                            }}
                        </form>
                    }
                }
            >
                <div class="space-y-5">
                    <Alert
                        kind=AlertKind::Success
                        message=format!(
                            "If an account exists for {}, a reset link is on its way. Check your inbox.",
                            sent_to(),
                        )
                    />
                    <button
                        type="button"
                        class=format!("w-full {}", Theme::BUTTON_SECONDARY)
                        on:click=move |_| controller.with_value(ResetController::send_another)
                    >
                        "Send another email"
                    </button>
                </div>
            </Show>
            <p class="mt-6 text-sm text-gray-500 dark:text-gray-400">
                <A href=paths::LOGIN {..} class=Theme::LINK>
                    "Back to sign in"
                </A>
            </p>
        </AuthCard>
    }
}
