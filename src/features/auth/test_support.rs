//! Scriptable identity backend and state recorder shared by the auth tests.

use crate::features::auth::{
    error::AuthError,
    store::{AuthBackend, SessionStore, Subscription},
    types::{Credentials, ResetRequest, SessionState, SignupRequest, UserRef},
};
use async_trait::async_trait;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use tokio::sync::oneshot;

struct Script {
    sign_in: Result<UserRef, AuthError>,
    sign_up: Result<(), AuthError>,
    reset: Result<(), AuthError>,
    session: Result<Option<UserRef>, AuthError>,
    sign_out: Result<(), AuthError>,
}

#[derive(Default)]
struct Calls {
    sign_in: Vec<Credentials>,
    sign_up: Vec<String>,
    reset: Vec<String>,
    sign_out: usize,
}

struct FakeInner {
    script: RefCell<Script>,
    calls: RefCell<Calls>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    live: Cell<usize>,
}

/// Backend double. Clones share the same script and call log.
#[derive(Clone)]
pub(crate) struct FakeBackend {
    inner: Rc<FakeInner>,
}

impl FakeBackend {
    /// Every operation succeeds; sign-in returns user `1`.
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(FakeInner {
                script: RefCell::new(Script {
                    sign_in: Ok(UserRef {
                        id: "1".to_string(),
                        email: Some("user@example.com".to_string()),
                    }),
                    sign_up: Ok(()),
                    reset: Ok(()),
                    session: Ok(None),
                    sign_out: Ok(()),
                }),
                calls: RefCell::new(Calls::default()),
                gate: RefCell::new(None),
                live: Cell::new(0),
            }),
        }
    }

    /// Holds the next backend call open until the returned sender fires.
    pub(crate) fn hold(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        *self.inner.gate.borrow_mut() = Some(gate);
        release
    }

    pub(crate) fn fail_sign_in(&self, err: AuthError) {
        self.inner.script.borrow_mut().sign_in = Err(err);
    }

    pub(crate) fn fail_sign_up(&self, err: AuthError) {
        self.inner.script.borrow_mut().sign_up = Err(err);
    }

    pub(crate) fn fail_reset(&self, err: AuthError) {
        self.inner.script.borrow_mut().reset = Err(err);
    }

    pub(crate) fn succeed_reset(&self) {
        self.inner.script.borrow_mut().reset = Ok(());
    }

    pub(crate) fn fail_sign_out(&self) {
        self.inner.script.borrow_mut().sign_out =
            Err(AuthError::Rejected("session already gone".to_string()));
    }

    pub(crate) fn set_session(&self, session: Result<Option<UserRef>, AuthError>) {
        self.inner.script.borrow_mut().session = session;
    }

    pub(crate) fn sign_in_calls(&self) -> Vec<Credentials> {
        self.inner.calls.borrow().sign_in.clone()
    }

    pub(crate) fn sign_up_emails(&self) -> Vec<String> {
        self.inner.calls.borrow().sign_up.clone()
    }

    pub(crate) fn reset_calls(&self) -> Vec<String> {
        self.inner.calls.borrow().reset.clone()
    }

    pub(crate) fn sign_out_count(&self) -> usize {
        self.inner.calls.borrow().sign_out
    }

    /// Number of backend calls currently awaiting their gate.
    pub(crate) fn in_flight(&self) -> usize {
        self.inner.live.get()
    }

    async fn wait_gate(&self) {
        let gate = self.inner.gate.borrow_mut().take();
        if let Some(gate) = gate {
            self.inner.live.set(self.inner.live.get() + 1);
            let _ = gate.await;
            self.inner.live.set(self.inner.live.get() - 1);
        }
    }
}

#[async_trait(?Send)]
impl AuthBackend for FakeBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserRef, AuthError> {
        self.inner.calls.borrow_mut().sign_in.push(credentials.clone());
        self.wait_gate().await;
        self.inner.script.borrow().sign_in.clone()
    }

    async fn sign_up(&self, request: &SignupRequest) -> Result<(), AuthError> {
        self.inner.calls.borrow_mut().sign_up.push(request.email.clone());
        self.wait_gate().await;
        self.inner.script.borrow().sign_up.clone()
    }

    async fn reset_password(&self, request: &ResetRequest) -> Result<(), AuthError> {
        self.inner.calls.borrow_mut().reset.push(request.email.clone());
        self.wait_gate().await;
        self.inner.script.borrow().reset.clone()
    }

    async fn current_user(&self) -> Result<Option<UserRef>, AuthError> {
        self.wait_gate().await;
        self.inner.script.borrow().session.clone()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.inner.calls.borrow_mut().sign_out += 1;
        self.wait_gate().await;
        self.inner.script.borrow().sign_out.clone()
    }
}

/// Collects every snapshot a store publishes.
pub(crate) struct Recorder {
    states: Rc<RefCell<Vec<SessionState>>>,
    _subscription: Subscription,
}

impl Recorder {
    pub(crate) fn attach(store: &SessionStore) -> Self {
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        let subscription = store.subscribe(move |state| sink.borrow_mut().push(state.clone()));
        Self {
            states,
            _subscription: subscription,
        }
    }

    pub(crate) fn states(&self) -> Vec<SessionState> {
        self.states.borrow().clone()
    }
}
