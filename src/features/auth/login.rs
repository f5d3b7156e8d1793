//! Login flow controller. It validates the form, asks the session store to sign
//! in, and navigates to the landing page only after it observes a settled
//! session (a user is present and `signing_in` is false). The return value of
//! the sign-in call never triggers navigation by itself, which keeps the page
//! correct when the store publishes its fields out of order.

use crate::features::auth::{
    controller::{FlowCell, Navigator},
    error::AuthError,
    store::{SessionStore, Subscription},
    types::{Credentials, SessionState},
    validation::{FieldErrors, FieldSpec, FormValues, Rule, Schema},
};
use std::{future::Future, rc::Rc};
use tracing::{debug, info, warn};

const LOGIN_SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec {
            name: "email",
            label: "Email",
            rules: &[Rule::Required, Rule::Email],
        },
        FieldSpec {
            name: "password",
            label: "Password",
            rules: &[Rule::Required],
        },
    ],
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormValues for LoginForm {
    fn value(&self, field: &str) -> &str {
        match field {
            "email" => &self.email,
            "password" => &self.password,
            _ => "",
        }
    }
}

/// Local state of the login page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginFlow {
    pub form: LoginForm,
    pub field_errors: FieldErrors,
    /// "Forgot password?" panel; hidden on every mount.
    pub show_reset_panel: bool,
    awaiting_session: bool,
}

impl LoginFlow {
    pub fn set_email(&mut self, value: String) {
        self.form.email = value;
        self.field_errors.clear("email");
    }

    pub fn set_password(&mut self, value: String) {
        self.form.password = value;
        self.field_errors.clear("password");
    }

    pub fn toggle_reset_panel(&mut self) {
        self.show_reset_panel = !self.show_reset_panel;
    }

    /// True between a valid submit and the settled session (or the failure).
    pub fn awaiting_session(&self) -> bool {
        self.awaiting_session
    }

    /// Validates the form. On success the flow starts waiting for a settled
    /// session and returns the credentials to hand to the store.
    fn prepare_submit(&mut self) -> Option<Credentials> {
        match LOGIN_SCHEMA.validate(&self.form) {
            Ok(()) => {
                self.field_errors = FieldErrors::default();
                self.awaiting_session = true;
                Some(Credentials::new(&self.form.email, &self.form.password))
            }
            Err(errors) => {
                self.field_errors = errors;
                None
            }
        }
    }

    /// Returns true exactly once per attempt, when the session settles.
    fn observe(&mut self, session: &SessionState) -> bool {
        if self.awaiting_session && session.current_user.is_some() && !session.signing_in {
            self.awaiting_session = false;
            true
        } else {
            false
        }
    }

    fn abandon_attempt(&mut self) {
        self.awaiting_session = false;
    }
}

struct Shared {
    flow: FlowCell<LoginFlow>,
    store: SessionStore,
    navigator: Box<dyn Navigator>,
    landing_path: String,
    _subscription: Subscription,
}

impl Shared {
    fn observe(&self, session: &SessionState) {
        if self.flow.update(|flow| flow.observe(session)) {
            info!(path = %self.landing_path, "session settled, leaving login");
            self.navigator.navigate(&self.landing_path);
        }
    }
}

/// Drives one login page instance. Dropping it unsubscribes from the store.
pub struct LoginController {
    shared: Rc<Shared>,
}

impl LoginController {
    pub fn new(
        store: SessionStore,
        navigator: impl Navigator + 'static,
        landing_path: impl Into<String>,
        on_change: impl Fn(&LoginFlow) + 'static,
    ) -> Self {
        let shared = Rc::new_cyclic(|weak: &std::rc::Weak<Shared>| {
            let weak = weak.clone();
            let subscription = store.subscribe(move |session| {
                if let Some(shared) = weak.upgrade() {
                    shared.observe(session);
                }
            });

            Shared {
                flow: FlowCell::new(LoginFlow::default(), on_change),
                store,
                navigator: Box::new(navigator),
                landing_path: landing_path.into(),
                _subscription: subscription,
            }
        });

        Self { shared }
    }

    pub fn flow(&self) -> LoginFlow {
        self.shared.flow.get()
    }

    pub fn set_email(&self, value: String) {
        self.shared.flow.update(|flow| flow.set_email(value));
    }

    pub fn set_password(&self, value: String) {
        self.shared.flow.update(|flow| flow.set_password(value));
    }

    pub fn toggle_reset_panel(&self) {
        self.shared.flow.update(LoginFlow::toggle_reset_panel);
    }

    /// Validates and starts the sign-in synchronously, then returns the task
    /// that waits for it. The store's `signing_in` flag is already set when
    /// this returns, so a second submit is ignored even if the first task has
    /// not run yet. A failed sign-in is logged and swallowed; the store
    /// publishes the error text.
    pub fn submit(&self) -> impl Future<Output = ()> + 'static {
        let store = &self.shared.store;
        let weak = Rc::downgrade(&self.shared);

        let attempt = if store.snapshot().operation_in_flight() {
            debug!("login submit ignored while a request is in flight");
            None
        } else {
            self.shared
                .flow
                .update(LoginFlow::prepare_submit)
                .map(|credentials| {
                    store.clear_error();
                    store.sign_in(credentials)
                })
        };

        async move {
            let Some(attempt) = attempt else {
                return;
            };
            match attempt.await {
                Ok(_) => {}
                // The request holding the flag owns the pending navigation.
                Err(AuthError::Busy) => debug!("sign-in refused while another request runs"),
                Err(err) => {
                    warn!(error = %err, "sign-in attempt failed");
                    if let Some(shared) = weak.upgrade() {
                        shared.flow.update(LoginFlow::abandon_attempt);
                    }
                }
            }
        }
    }
}
