//! Session store: the single source of truth for who is signed in and which
//! auth request is in flight. Controllers never mutate the state directly; they
//! call the async operations below and observe published snapshots.
//!
//! An operation marks its flag in the state as soon as it is called, before the
//! returned future is first polled, so a second call made in the same tick is
//! already refused.
//!
//! Publishing is serialized. A change made from inside a subscriber callback is
//! queued and delivered only after the current snapshot reached every
//! subscriber, so all subscribers observe the same sequence of snapshots.
//! Subscriptions are guards: dropping one unsubscribes immediately.

use crate::features::auth::{
    error::AuthError,
    types::{Credentials, ResetRequest, SessionState, SignupRequest, UserRef},
};
use async_trait::async_trait;
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    future::Future,
    rc::{Rc, Weak},
};
use tracing::{debug, info, warn};

/// Identity provider operations the store delegates to.
#[async_trait(?Send)]
pub trait AuthBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserRef, AuthError>;
    async fn sign_up(&self, request: &SignupRequest) -> Result<(), AuthError>;
    async fn reset_password(&self, request: &ResetRequest) -> Result<(), AuthError>;
    /// Returns the user behind the current session cookie, if any.
    async fn current_user(&self) -> Result<Option<UserRef>, AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

type Callback = Rc<dyn Fn(&SessionState)>;

struct Inner {
    backend: Box<dyn AuthBackend>,
    state: RefCell<SessionState>,
    subscribers: RefCell<Vec<(u64, Callback)>>,
    next_id: Cell<u64>,
    pending: RefCell<VecDeque<SessionState>>,
    publishing: Cell<bool>,
}

impl Inner {
    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers
            .borrow()
            .iter()
            .any(|(subscriber, _)| *subscriber == id)
    }
}

/// Cheap to clone; every clone shares the same state and subscribers.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

/// Keeps a subscriber registered until dropped.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    store: Weak<Inner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .subscribers
                .borrow_mut()
                .retain(|(subscriber, _)| *subscriber != self.id);
            debug!(subscriber = self.id, "session subscriber removed");
        }
    }
}

/// An operation flag held by one request. Dropping it clears the flag, so a
/// request abandoned before it finished never leaves the store busy.
struct Claim {
    store: SessionStore,
    release: fn(&mut SessionState),
}

impl Drop for Claim {
    fn drop(&mut self) {
        self.store.update(self.release);
    }
}

impl SessionStore {
    pub fn new(backend: impl AuthBackend + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                backend: Box::new(backend),
                state: RefCell::new(SessionState::default()),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                pending: RefCell::new(VecDeque::new()),
                publishing: Cell::new(false),
            }),
        }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Registers `callback` for every future state change. The current state is
    /// not replayed; read [`SessionStore::snapshot`] for it.
    pub fn subscribe(&self, callback: impl Fn(&SessionState) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));

        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    pub fn clear_error(&self) {
        self.update(|state| state.error = None);
    }

    /// Signs in and publishes the user. On failure the error text is published
    /// before the error is returned.
    ///
    /// `signing_in` is claimed when this is called, not when the returned
    /// future is first polled, so a second request made in between is
    /// refused with [`AuthError::Busy`].
    pub fn sign_in(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<UserRef, AuthError>> + 'static {
        let claim = self.begin(|state| state.signing_in = true, |state| state.signing_in = false);
        let store = self.clone();

        async move {
            let _claim = claim?;
            match store.inner.backend.sign_in(&credentials).await {
                Ok(user) => {
                    info!(user_id = %user.id, "signed in");
                    store.update(|state| {
                        state.current_user = Some(user.clone());
                        state.signing_in = false;
                    });
                    Ok(user)
                }
                Err(err) => Err(store.fail(err, |state| state.signing_in = false)),
            }
        }
    }

    /// Claims `signing_up` immediately, like [`SessionStore::sign_in`].
    pub fn sign_up(
        &self,
        request: SignupRequest,
    ) -> impl Future<Output = Result<(), AuthError>> + 'static {
        let claim = self.begin(|state| state.signing_up = true, |state| state.signing_up = false);
        let store = self.clone();

        async move {
            let _claim = claim?;
            match store.inner.backend.sign_up(&request).await {
                Ok(()) => {
                    info!("account created, awaiting email confirmation");
                    store.update(|state| state.signing_up = false);
                    Ok(())
                }
                Err(err) => Err(store.fail(err, |state| state.signing_up = false)),
            }
        }
    }

    /// Claims `resetting_password` immediately, like [`SessionStore::sign_in`].
    pub fn reset_password(
        &self,
        request: ResetRequest,
    ) -> impl Future<Output = Result<(), AuthError>> + 'static {
        let claim = self.begin(
            |state| state.resetting_password = true,
            |state| state.resetting_password = false,
        );
        let store = self.clone();

        async move {
            let _claim = claim?;
            match store.inner.backend.reset_password(&request).await {
                Ok(()) => {
                    info!("password reset email requested");
                    store.update(|state| state.resetting_password = false);
                    Ok(())
                }
                Err(err) => Err(store.fail(err, |state| state.resetting_password = false)),
            }
        }
    }

    /// Looks up the existing session once at startup. A sign-in that finished
    /// first wins over an anonymous lookup result.
    pub async fn hydrate(&self) {
        match self.inner.backend.current_user().await {
            Ok(user) => self.update(|state| {
                if state.current_user.is_none() {
                    state.current_user = user;
                }
                state.hydrated = true;
            }),
            Err(err) => {
                warn!(error = %err, "session lookup failed");
                self.update(|state| state.hydrated = true);
            }
        }
    }

    /// Clears the local session even when the server call fails.
    pub async fn sign_out(&self) {
        if let Err(err) = self.inner.backend.sign_out().await {
            warn!(error = %err, "sign-out request failed");
        }
        info!("signed out");
        self.update(|state| {
            state.current_user = None;
            state.error = None;
        });
    }

    /// Marks an operation as started, refusing to overlap another one. The
    /// flag stays set until the returned claim is dropped.
    fn begin(
        &self,
        mark: fn(&mut SessionState),
        release: fn(&mut SessionState),
    ) -> Result<Claim, AuthError> {
        if self.inner.state.borrow().operation_in_flight() {
            debug!("rejected auth request while another is in flight");
            return Err(AuthError::Busy);
        }
        self.update(|state| {
            mark(state);
            state.error = None;
        });
        Ok(Claim {
            store: self.clone(),
            release,
        })
    }

    fn fail(&self, err: AuthError, settle: impl FnOnce(&mut SessionState)) -> AuthError {
        let message = err.to_string();
        self.update(|state| {
            settle(state);
            state.error = Some(message);
        });
        err
    }

    fn update(&self, change: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            let before = state.clone();
            change(&mut state);
            if *state == before {
                return;
            }
            state.clone()
        };

        self.inner.pending.borrow_mut().push_back(snapshot);
        self.publish();
    }

    fn publish(&self) {
        if self.inner.publishing.replace(true) {
            // The outer publish loop delivers what was queued.
            return;
        }

        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(snapshot) = next else {
                break;
            };
            let subscribers: Vec<(u64, Callback)> = self.inner.subscribers.borrow().clone();
            for (id, callback) in subscribers {
                if self.inner.is_subscribed(id) {
                    callback(&snapshot);
                }
            }
        }

        self.inner.publishing.set(false);
    }

    #[cfg(test)]
    pub(crate) fn force(&self, change: impl FnOnce(&mut SessionState)) {
        self.update(change);
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::features::auth::{
        error::AuthError,
        test_support::{FakeBackend, Recorder},
        types::{Credentials, ResetRequest, SessionState, SignupRequest, UserRef},
    };
    use secrecy::ExposeSecret;
    use std::{cell::RefCell, rc::Rc};

    fn user(id: &str) -> UserRef {
        UserRef {
            id: id.to_string(),
            email: Some(format!("{id}@example.com")),
        }
    }

    #[tokio::test]
    async fn sign_in_publishes_flags_then_user() {
        let backend = FakeBackend::new();
        let store = SessionStore::new(backend.clone());
        let recorder = Recorder::attach(&store);

        let signed_in = store
            .sign_in(Credentials::new("user@example.com", "secret123"))
            .await
            .unwrap();

        assert_eq!(signed_in.id, "1");
        let states = recorder.states();
        assert_eq!(states.len(), 2);
        assert!(states[0].signing_in);
        assert!(states[0].current_user.is_none());
        assert!(!states[1].signing_in);
        assert_eq!(states[1].current_user.as_ref().map(|u| u.id.as_str()), Some("1"));

        let calls = backend.sign_in_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].email, "user@example.com");
        assert_eq!(calls[0].password.expose_secret(), "secret123");
    }

    #[tokio::test]
    async fn failed_sign_in_records_error_before_returning() {
        let backend = FakeBackend::new();
        backend.fail_sign_in(AuthError::Rejected("Invalid email or password.".to_string()));
        let store = SessionStore::new(backend.clone());

        let err = store
            .sign_in(Credentials::new("user@example.com", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::Rejected("Invalid email or password.".to_string()));
        let state = store.snapshot();
        assert!(!state.signing_in);
        assert!(state.current_user.is_none());
        assert_eq!(state.error.as_deref(), Some("Invalid email or password."));
    }

    #[tokio::test]
    async fn overlapping_requests_are_refused() {
        let backend = FakeBackend::new();
        let release = backend.hold();
        let store = SessionStore::new(backend.clone());

        let first = store.sign_in(Credentials::new("user@example.com", "secret123"));
        let second = async {
            let err = store
                .reset_password(ResetRequest::new("user@example.com"))
                .await
                .unwrap_err();
            release.send(()).unwrap();
            err
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_ok());
        assert_eq!(second, AuthError::Busy);
        assert!(backend.reset_calls().is_empty());
    }

    #[tokio::test]
    async fn requests_claim_their_flag_before_the_first_poll() {
        let backend = FakeBackend::new();
        let store = SessionStore::new(backend.clone());

        let first = store.sign_in(Credentials::new("user@example.com", "secret123"));
        assert!(store.snapshot().signing_in);
        let second = store.sign_in(Credentials::new("user@example.com", "secret123"));

        assert_eq!(second.await.unwrap_err(), AuthError::Busy);
        assert!(first.await.is_ok());
        assert_eq!(backend.sign_in_calls().len(), 1);
        assert!(!store.snapshot().signing_in);
    }

    #[test]
    fn dropping_an_unpolled_request_releases_its_flag() {
        let backend = FakeBackend::new();
        let store = SessionStore::new(backend.clone());

        let pending = store.reset_password(ResetRequest::new("user@example.com"));
        assert!(store.snapshot().resetting_password);
        drop(pending);

        let state = store.snapshot();
        assert!(!state.operation_in_flight());
        assert_eq!(state.error, None);
        assert!(backend.reset_calls().is_empty());
    }

    #[tokio::test]
    async fn starting_an_operation_clears_the_previous_error() {
        let backend = FakeBackend::new();
        backend.fail_reset(AuthError::Rejected("Too many requests.".to_string()));
        let store = SessionStore::new(backend.clone());
        let _ = store.reset_password(ResetRequest::new("a@b.io")).await;
        assert!(store.snapshot().error.is_some());

        backend.succeed_reset();
        store
            .reset_password(ResetRequest::new("a@b.io"))
            .await
            .unwrap();

        assert_eq!(store.snapshot().error, None);
    }

    #[tokio::test]
    async fn sign_up_toggles_its_own_flag() {
        let backend = FakeBackend::new();
        let store = SessionStore::new(backend.clone());
        let recorder = Recorder::attach(&store);

        store
            .sign_up(SignupRequest::new("new@example.com", "a long password"))
            .await
            .unwrap();

        let states = recorder.states();
        assert!(states[0].signing_up);
        assert!(!states[1].signing_up);
        assert!(store.snapshot().current_user.is_none());
        assert_eq!(backend.sign_up_emails(), vec!["new@example.com".to_string()]);
    }

    #[test]
    fn clear_error_publishes_only_on_change() {
        let store = SessionStore::new(FakeBackend::new());
        let recorder = Recorder::attach(&store);

        store.clear_error();
        assert!(recorder.states().is_empty());

        store.force(|state| state.error = Some("boom".to_string()));
        store.clear_error();
        let states = recorder.states();
        assert_eq!(states.len(), 2);
        assert_eq!(states[1].error, None);
    }

    #[test]
    fn subscribers_are_notified_in_registration_order() {
        let store = SessionStore::new(FakeBackend::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let first_log = Rc::clone(&log);
        let _first = store.subscribe(move |_| first_log.borrow_mut().push("first"));
        let second_log = Rc::clone(&log);
        let _second = store.subscribe(move |_| second_log.borrow_mut().push("second"));

        store.force(|state| state.error = Some("x".to_string()));

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn reentrant_updates_reach_everyone_in_the_same_order() {
        let store = SessionStore::new(FakeBackend::new());
        let first_seen = Rc::new(RefCell::new(Vec::new()));
        let second_seen = Rc::new(RefCell::new(Vec::new()));

        let reentrant_store = store.clone();
        let first_log = Rc::clone(&first_seen);
        let _first = store.subscribe(move |state: &SessionState| {
            first_log.borrow_mut().push(state.error.clone());
            if state.error.as_deref() == Some("one") {
                reentrant_store.force(|state| state.error = Some("two".to_string()));
            }
        });
        let second_log = Rc::clone(&second_seen);
        let _second =
            store.subscribe(move |state: &SessionState| second_log.borrow_mut().push(state.error.clone()));

        store.force(|state| state.error = Some("one".to_string()));

        let expected = vec![Some("one".to_string()), Some("two".to_string())];
        assert_eq!(*first_seen.borrow(), expected);
        assert_eq!(*second_seen.borrow(), expected);
    }

    #[test]
    fn dropping_a_subscription_unsubscribes() {
        let store = SessionStore::new(FakeBackend::new());
        let recorder = Recorder::attach(&store);
        assert_eq!(store.subscriber_count(), 1);

        drop(recorder);
        assert_eq!(store.subscriber_count(), 0);
        store.force(|state| state.error = Some("nobody listens".to_string()));
    }

    #[test]
    fn subscriber_dropped_mid_publish_is_skipped() {
        let store = SessionStore::new(FakeBackend::new());
        let victim: Rc<RefCell<Option<super::Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(0));

        let slot = Rc::clone(&victim);
        let _killer = store.subscribe(move |_| {
            slot.borrow_mut().take();
        });
        let counter = Rc::clone(&calls);
        *victim.borrow_mut() = Some(store.subscribe(move |_| *counter.borrow_mut() += 1));

        store.force(|state| state.error = Some("x".to_string()));

        assert_eq!(*calls.borrow(), 0);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn hydrate_restores_existing_session() {
        let backend = FakeBackend::new();
        backend.set_session(Ok(Some(user("7"))));
        let store = SessionStore::new(backend);

        store.hydrate().await;

        let state = store.snapshot();
        assert!(state.hydrated);
        assert_eq!(state.current_user, Some(user("7")));
    }

    #[tokio::test]
    async fn hydrate_failure_leaves_user_anonymous() {
        let backend = FakeBackend::new();
        backend.set_session(Err(AuthError::Transport(crate::app_lib::AppError::Network(
            "offline".to_string(),
        ))));
        let store = SessionStore::new(backend);

        store.hydrate().await;

        let state = store.snapshot();
        assert!(state.hydrated);
        assert!(state.current_user.is_none());
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn hydrate_does_not_clobber_a_fresh_sign_in() {
        let backend = FakeBackend::new();
        let store = SessionStore::new(backend);
        store
            .sign_in(Credentials::new("user@example.com", "secret123"))
            .await
            .unwrap();

        store.hydrate().await;

        assert!(store.snapshot().current_user.is_some());
    }

    #[tokio::test]
    async fn sign_out_clears_session_even_when_server_fails() {
        let backend = FakeBackend::new();
        backend.fail_sign_out();
        let store = SessionStore::new(backend.clone());
        store.force(|state| state.current_user = Some(user("1")));

        store.sign_out().await;

        assert!(store.snapshot().current_user.is_none());
        assert_eq!(backend.sign_out_count(), 1);
    }
}
