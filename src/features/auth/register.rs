//! Registration flow controller. Accounts are confirmed by email, so a
//! successful sign-up ends on a "check your email" panel instead of a session.

use crate::features::auth::{
    controller::FlowCell,
    store::SessionStore,
    types::SignupRequest,
    validation::{FieldErrors, FieldSpec, FormValues, Rule, Schema},
};
use std::{future::Future, rc::Rc};
use tracing::{debug, warn};

/// Minimum password length enforced by the client for early UX feedback.
pub const MIN_PASSWORD_LENGTH: usize = 12;

const REGISTER_SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec {
            name: "email",
            label: "Email",
            rules: &[Rule::Required, Rule::Email],
        },
        FieldSpec {
            name: "password",
            label: "Password",
            rules: &[Rule::Required, Rule::MinLength(MIN_PASSWORD_LENGTH)],
        },
        FieldSpec {
            name: "confirm_password",
            label: "Password confirmation",
            rules: &[Rule::Required, Rule::SameAs("password")],
        },
    ],
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegisterPhase {
    #[default]
    Editing,
    CheckEmail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormValues for RegisterForm {
    fn value(&self, field: &str) -> &str {
        match field {
            "email" => &self.email,
            "password" => &self.password,
            "confirm_password" => &self.confirm_password,
            _ => "",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFlow {
    pub form: RegisterForm,
    pub field_errors: FieldErrors,
    pub phase: RegisterPhase,
    pub registered_email: Option<String>,
}

impl RegisterFlow {
    pub fn set_email(&mut self, value: String) {
        self.form.email = value;
        self.field_errors.clear("email");
    }

    pub fn set_password(&mut self, value: String) {
        self.form.password = value;
        self.field_errors.clear("password");
    }

    pub fn set_confirm_password(&mut self, value: String) {
        self.form.confirm_password = value;
        self.field_errors.clear("confirm_password");
    }

    fn prepare_submit(&mut self) -> Option<SignupRequest> {
        if self.phase != RegisterPhase::Editing {
            return None;
        }
        match REGISTER_SCHEMA.validate(&self.form) {
            Ok(()) => {
                self.field_errors = FieldErrors::default();
                Some(SignupRequest::new(&self.form.email, &self.form.password))
            }
            Err(errors) => {
                self.field_errors = errors;
                None
            }
        }
    }

    fn mark_registered(&mut self, email: String) {
        self.phase = RegisterPhase::CheckEmail;
        self.registered_email = Some(email);
        self.form.password.clear();
        self.form.confirm_password.clear();
    }

    pub fn start_over(&mut self) {
        *self = Self::default();
    }
}

pub struct RegisterController {
    flow: Rc<FlowCell<RegisterFlow>>,
    store: SessionStore,
}

impl RegisterController {
    pub fn new(store: SessionStore, on_change: impl Fn(&RegisterFlow) + 'static) -> Self {
        Self {
            flow: Rc::new(FlowCell::new(RegisterFlow::default(), on_change)),
            store,
        }
    }

    pub fn flow(&self) -> RegisterFlow {
        self.flow.get()
    }

    pub fn set_email(&self, value: String) {
        self.flow.update(|flow| flow.set_email(value));
    }

    pub fn set_password(&self, value: String) {
        self.flow.update(|flow| flow.set_password(value));
    }

    pub fn set_confirm_password(&self, value: String) {
        self.flow.update(|flow| flow.set_confirm_password(value));
    }

    pub fn start_over(&self) {
        self.flow.update(RegisterFlow::start_over);
    }

    pub fn submit(&self) -> impl Future<Output = ()> + 'static {
        let store = &self.store;
        let weak = Rc::downgrade(&self.flow);

        let attempt = if store.snapshot().operation_in_flight() {
            debug!("sign-up submit ignored while a request is in flight");
            None
        } else {
            self.flow.update(RegisterFlow::prepare_submit).map(|request| {
                let email = request.email.clone();
                store.clear_error();
                (email, store.sign_up(request))
            })
        };

        async move {
            let Some((email, pending)) = attempt else {
                return;
            };
            match pending.await {
                Ok(()) => {
                    if let Some(flow) = weak.upgrade() {
                        flow.update(|flow| flow.mark_registered(email));
                    }
                }
                Err(err) => warn!(error = %err, "sign-up failed"),
            }
        }
    }
}
