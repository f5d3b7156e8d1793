//! Login route. The page owns a `LoginController` for as long as it is
//! mounted and mirrors its local state into a signal; session fields (busy
//! flag, error banner) come from the shared auth context. Leaving the page is
//! driven by the controller once the session settles.

use crate::app_lib::{config::AppConfig, theme::Theme};
use crate::components::{Alert, AlertKind, AlreadySignedInPanel, AuthCard, Button, TextField};
use crate::features::auth::{
    login::{LoginController, LoginFlow},
    state::use_auth,
    types::SessionState,
};
use crate::routes::paths;
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use leptos_router::{components::A, hooks::use_navigate};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let flow = RwSignal::new(LoginFlow::default());

    let controller = StoredValue::new_local(LoginController::new(
        auth.store(),
        move |path: &str| navigate(path, Default::default()),
        AppConfig::load().landing_path,
        move |state: &LoginFlow| flow.set(state.clone()),
    ));
    auth.clear_error();

    let email = Signal::derive(move || flow.with(|state| state.form.email.clone()));
    let password = Signal::derive(move || flow.with(|state| state.form.password.clone()));
    let email_error = Signal::derive(move || {
        flow.with(|state| state.field_errors.get("email").map(str::to_string))
    });
    let password_error = Signal::derive(move || {
        flow.with(|state| state.field_errors.get("password").map(str::to_string))
    });
    // Matches the controller guard: any request in flight blocks a submit.
    let busy = Signal::derive(move || auth.session.with(SessionState::operation_in_flight));
    let store_error = move || auth.session.with(|state| state.error.clone());
    let show_form =
        move || !auth.is_authenticated.get() || flow.with(LoginFlow::awaiting_session);

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if let Some(task) = controller.try_with_value(LoginController::submit) {
            spawn_local(task);
        }
    };

    view! {
        <AuthCard title="Sign in" subtitle="Welcome back. Use your email and password.">
            <Show when=show_form fallback=|| view! { <AlreadySignedInPanel /> }>
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
                    <TextField
                        id="password"
                        label="Password"
                        input_type="password"
                        autocomplete="current-password"
                        value=password
                        error=password_error
                        on_input=Callback::new(move |value: String| {
                            controller.with_value(|controller| controller.set_password(value));
                        })
                    />
                    <Button button_type="submit" busy=busy>
                        "Sign in"
                    </Button>
                    {move || {
                        store_error()
                            .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                    }}
                </form>
                <div class="mt-6 space-y-3 text-sm text-gray-500 dark:text-gray-400">
                    <button
                        type="button"
                        class=Theme::LINK
                        aria-expanded=move || flow.with(|state| state.show_reset_panel).to_string()
                        on:click=move |_| {
                            controller.with_value(LoginController::toggle_reset_panel);
                        }
                    >
                        "Forgot password?"
                    </button>
                    <Show when=move || flow.with(|state| state.show_reset_panel)>
                        <div class="rounded-lg bg-gray-50 p-4 dark:bg-gray-700/40">
                            "We can email you a link to choose a new password. "
                            <A href=paths::RESET_PASSWORD {..} class=Theme::LINK>
                                "Reset your password"
                            </A>
                        </div>
                    </Show>
                    <p>
                        "No account yet? "
                        <A href=paths::SIGNUP {..} class=Theme::LINK>
                            "Create one"
                        </A>
                    </p>
                </div>
            </Show>
        </AuthCard>
    }
}
