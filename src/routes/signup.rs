//! Registration route. A successful sign-up does not start a session; the
//! page asks the visitor to confirm their email first.

use crate::app_lib::theme::Theme;
use crate::components::{Alert, AlertKind, AlreadySignedInPanel, AuthCard, Button, TextField};
use crate::features::auth::{
    register::{MIN_PASSWORD_LENGTH, RegisterController, RegisterFlow, RegisterPhase},
    state::use_auth,
    types::SessionState,
};
use crate::routes::paths;
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use leptos_router::components::A;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth = use_auth();
    let flow = RwSignal::new(RegisterFlow::default());
    let controller = StoredValue::new_local(RegisterController::new(
        auth.store(),
        move |state: &RegisterFlow| flow.set(state.clone()),
    ));
    auth.clear_error();

    let field = move |name: &'static str| {
        Signal::derive(move || flow.with(|state| state.field_errors.get(name).map(str::to_string)))
    };
    let email = Signal::derive(move || flow.with(|state| state.form.email.clone()));
    let password = Signal::derive(move || flow.with(|state| state.form.password.clone()));
    let confirm_password =
        Signal::derive(move || flow.with(|state| state.form.confirm_password.clone()));
    // Matches the controller guard: any request in flight blocks a submit.
    let busy = Signal::derive(move || auth.session.with(SessionState::operation_in_flight));
    let store_error = move || auth.session.with(|state| state.error.clone());
    let check_email = move || flow.with(|state| state.phase == RegisterPhase::CheckEmail);
    let registered_email =
        move || flow.with(|state| state.registered_email.clone().unwrap_or_default());
    let password_hint = format!("At least {MIN_PASSWORD_LENGTH} characters.");

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if let Some(task) = controller.try_with_value(RegisterController::submit) {
            spawn_local(task);
        }
    };

    view! {
        <AuthCard title="Create an account" subtitle="It only takes a minute.">
            <Show
                when=move || !check_email()
                fallback=move || {
                    view! {
                        <div class="space-y-5">
                            <Alert
                                kind=AlertKind::Success
                                message=format!(
                                    "Check your email. We sent a confirmation link to {}.",
                                    registered_email(),
                                )
                            />
                            <button
                                type="button"
                                class=format!("w-full {}", Theme::BUTTON_SECONDARY)
                                on:click=move |_| controller.with_value(RegisterController::start_over)
                            >
                                "Use a different email"
                            </button>
                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                "Already confirmed? "
                                <A href=paths::LOGIN {..} class=Theme::LINK>
                                    "Sign in"
                                </A>
                            </p>
                        </div>
                    }
                }
            >
                <Show when=move || !auth.is_authenticated.get() fallback=|| view! { <AlreadySignedInPanel /> }>
                    <form class="space-y-5" on:submit=on_submit novalidate>
                        <TextField
                            id="email"
                            label="Email"
                            input_type="email"
                            autocomplete="email"
                            placeholder="name@example.com"
                            value=email
                            error=field("email")
                            on_input=Callback::new(move |value: String| {
                                controller.with_value(|controller| controller.set_email(value));
                            })
                        />
                        <TextField
                            id="password"
                            label="Password"
                            input_type="password"
                            autocomplete="new-password"
                            value=password
                            error=field("password")
                            on_input=Callback::new(move |value: String| {
                                controller.with_value(|controller| controller.set_password(value));
                            })
                        />
                        <p class="-mt-3 text-xs text-gray-500 dark:text-gray-400">{password_hint.clone()}</p>
                        <TextField
                            id="confirm_password"
                            label="Confirm password"
                            input_type="password"
                            autocomplete="new-password"
                            value=confirm_password
                            error=field("confirm_password")
                            on_input=Callback::new(move |value: String| {
                                controller
                                    .with_value(|controller| controller.set_confirm_password(value));
                            })
                        />
                        <Button button_type="submit" busy=busy>
                            "Create account"
                        </Button>
                        {move || {
                            store_error()
                                .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                        }}
                    </form>
                    <p class="mt-6 text-sm text-gray-500 dark:text-gray-400">
                        "Already have an account? "
                        <A href=paths::LOGIN {..} class=Theme::LINK>
                            "Sign in"
                        </A>
                    </p>
                </Show>
            </Show>
        </AuthCard>
    }
}
