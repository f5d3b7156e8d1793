//! Password reset flow controller: a request form that turns into a "check
//! your email" confirmation once the store accepted the request. "Send another
//! email" only resets local state and never touches the store.

use crate::features::auth::{
    controller::FlowCell,
    store::SessionStore,
    types::ResetRequest,
    validation::{FieldErrors, FieldSpec, FormValues, Rule, Schema},
};
use std::{future::Future, rc::Rc};
use tracing::{debug, warn};

const RESET_SCHEMA: Schema = Schema {
    fields: &[FieldSpec {
        name: "email",
        label: "Email",
        rules: &[Rule::Required, Rule::Email],
    }],
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetPhase {
    #[default]
    RequestingEmail,
    EmailSent,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetForm {
    pub email: String,
}

impl FormValues for ResetForm {
    fn value(&self, field: &str) -> &str {
        match field {
            "email" => &self.email,
            _ => "",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetFlow {
    pub form: ResetForm,
    pub field_errors: FieldErrors,
    pub phase: ResetPhase,
    /// Address the confirmation refers to.
    pub sent_to: Option<String>,
}

impl ResetFlow {
    pub fn set_email(&mut self, value: String) {
        self.form.email = value;
        self.field_errors.clear("email");
    }

    fn prepare_submit(&mut self) -> Option<ResetRequest> {
        if self.phase != ResetPhase::RequestingEmail {
            return None;
        }
        match RESET_SCHEMA.validate(&self.form) {
            Ok(()) => {
                self.field_errors = FieldErrors::default();
                Some(ResetRequest::new(&self.form.email))
            }
            Err(errors) => {
                self.field_errors = errors;
                None
            }
        }
    }

    fn mark_sent(&mut self, email: String) {
        self.phase = ResetPhase::EmailSent;
        self.sent_to = Some(email);
    }

    /// Back to an empty request form.
    pub fn send_another(&mut self) {
        *self = Self::default();
    }
}

/// Drives one reset page instance.
pub struct ResetController {
    flow: Rc<FlowCell<ResetFlow>>,
    store: SessionStore,
}

impl ResetController {
    pub fn new(store: SessionStore, on_change: impl Fn(&ResetFlow) + 'static) -> Self {
        Self {
            flow: Rc::new(FlowCell::new(ResetFlow::default(), on_change)),
            store,
        }
    }

    pub fn flow(&self) -> ResetFlow {
        self.flow.get()
    }

    pub fn set_email(&self, value: String) {
        self.flow.update(|flow| flow.set_email(value));
    }

    pub fn send_another(&self) {
        self.flow.update(ResetFlow::send_another);
    }

    /// Validates and starts the request synchronously, then returns the task
    /// that waits for it. Only a successful store call moves the flow to
    /// [`ResetPhase::EmailSent`]; failures are logged and leave the form in
    /// place.
    pub fn submit(&self) -> impl Future<Output = ()> + 'static {
        let store = &self.store;
        let weak = Rc::downgrade(&self.flow);

        let attempt = if store.snapshot().operation_in_flight() {
            debug!("reset submit ignored while a request is in flight");
            None
        } else {
            self.flow.update(ResetFlow::prepare_submit).map(|request| {
                let email = request.email.clone();
                store.clear_error();
                (email, store.reset_password(request))
            })
        };

        async move {
            let Some((email, pending)) = attempt else {
                return;
            };
            match pending.await {
                Ok(()) => match weak.upgrade() {
                    Some(flow) => flow.update(|flow| flow.mark_sent(email)),
                    None => debug!("reset finished after the page was closed"),
                },
                Err(err) => warn!(error = %err, "password reset request failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ResetController, ResetFlow, ResetPhase};
    use crate::features::auth::{error::AuthError, store::SessionStore, test_support::FakeBackend};
    use std::{cell::RefCell, rc::Rc};

    fn controller() -> (FakeBackend, SessionStore, ResetController, Rc<RefCell<Vec<ResetFlow>>>) {
        let backend = FakeBackend::new();
        let store = SessionStore::new(backend.clone());
        let views = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&views);
        let controller =
            ResetController::new(store.clone(), move |flow: &ResetFlow| log.borrow_mut().push(flow.clone()));
        (backend, store, controller, views)
    }

    #[tokio::test]
    async fn successful_request_moves_to_email_sent() {
        let (backend, store, controller, _) = controller();
        controller.set_email(" User@Example.com ".to_string());

        controller.submit().await;

        let flow = controller.flow();
        assert_eq!(flow.phase, ResetPhase::EmailSent);
        assert_eq!(flow.sent_to.as_deref(), Some("user@example.com"));
        assert_eq!(backend.reset_calls(), vec!["user@example.com".to_string()]);
        assert!(!store.snapshot().resetting_password);
    }

    #[tokio::test]
    async fn failed_request_stays_and_shows_store_error() {
        let (backend, store, controller, _) = controller();
        backend.fail_reset(AuthError::Rejected("Too many reset requests.".to_string()));
        controller.set_email("user@example.com".to_string());

        controller.submit().await;

        assert_eq!(controller.flow().phase, ResetPhase::RequestingEmail);
        assert_eq!(controller.flow().form.email, "user@example.com");
        assert_eq!(store.snapshot().error.as_deref(), Some("Too many reset requests."));
    }

    #[tokio::test]
    async fn invalid_email_is_caught_locally() {
        let (backend, _, controller, _) = controller();
        controller.set_email("nope".to_string());

        controller.submit().await;

        assert!(backend.reset_calls().is_empty());
        assert_eq!(
            controller.flow().field_errors.get("email"),
            Some("Enter a valid email address.")
        );
    }

    #[tokio::test]
    async fn submit_clears_prior_error_first() {
        let (_, store, controller, _) = controller();
        store.force(|state| state.error = Some("stale".to_string()));
        controller.set_email("user@example.com".to_string());

        controller.submit().await;

        assert_eq!(store.snapshot().error, None);
    }

    #[tokio::test]
    async fn submit_is_ignored_while_a_request_is_in_flight() {
        let (backend, store, controller, _) = controller();
        store.force(|state| state.resetting_password = true);
        controller.set_email("user@example.com".to_string());

        controller.submit().await;

        assert!(backend.reset_calls().is_empty());
        assert_eq!(controller.flow().phase, ResetPhase::RequestingEmail);
    }

    #[tokio::test]
    async fn double_submit_sends_one_email_and_confirms() {
        let (backend, store, controller, _) = controller();
        let release = backend.hold();
        controller.set_email("user@example.com".to_string());

        let first = controller.submit();
        let second = controller.submit();
        assert!(store.snapshot().resetting_password);

        second.await;
        release.send(()).unwrap();
        first.await;

        assert_eq!(controller.flow().phase, ResetPhase::EmailSent);
        assert_eq!(backend.reset_calls().len(), 1);
        assert_eq!(store.snapshot().error, None);
    }

    #[tokio::test]
    async fn send_another_returns_to_an_empty_form() {
        let (backend, store, controller, _) = controller();
        controller.set_email("user@example.com".to_string());
        controller.submit().await;
        store.force(|state| state.error = Some("left over".to_string()));

        controller.send_another();
        controller.send_another();

        let flow = controller.flow();
        assert_eq!(flow, ResetFlow::default());
        assert_eq!(flow.phase, ResetPhase::RequestingEmail);
        assert!(flow.form.email.is_empty());
        assert_eq!(backend.reset_calls().len(), 1);
        assert_eq!(store.snapshot().error.as_deref(), Some("left over"));
    }

    #[tokio::test]
    async fn completion_after_teardown_is_a_no_op() {
        let (backend, store, controller, views) = controller();
        let release = backend.hold();
        controller.set_email("user@example.com".to_string());
        let seen_before = views.borrow().len();

        let submit = controller.submit();
        let teardown = async move {
            drop(controller);
            release.send(()).unwrap();
        };
        tokio::join!(submit, teardown);

        assert_eq!(views.borrow().len(), seen_before);
        assert!(!store.snapshot().resetting_password);
        assert_eq!(backend.in_flight(), 0);
    }
}
