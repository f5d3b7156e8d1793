//! Auth session context for the views. The provider owns the session store,
//! mirrors every published snapshot into a Leptos signal, and hydrates the
//! session once on mount. The mirror subscription is dropped on cleanup. Only
//! non-sensitive metadata is kept in memory; cookies remain `HttpOnly`.

use crate::features::auth::{client::HttpBackend, store::SessionStore, types::SessionState};
use leptos::{prelude::*, task::spawn_local};

#[derive(Clone, Copy)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    store: StoredValue<SessionStore, LocalStorage>,
    pub session: RwSignal<SessionState>,
    pub is_authenticated: Signal<bool>,
    pub is_loading: Signal<bool>,
}

impl AuthContext {
    /// Builds a context around the provided store.
    fn new(store: SessionStore) -> Self {
        let session = RwSignal::new(store.snapshot());
        let is_authenticated = Signal::derive(move || session.with(SessionState::is_authenticated));
        let is_loading = Signal::derive(move || !session.with(|state| state.hydrated));
        Self {
            store: StoredValue::new_local(store),
            session,
            is_authenticated,
            is_loading,
        }
    }

    /// Returns a handle to the shared store for controllers.
    pub fn store(&self) -> SessionStore {
        self.store.get_value()
    }

    /// Signs out in the background; the session signal follows the store.
    pub fn sign_out(&self) {
        let store = self.store();
        spawn_local(async move { store.sign_out().await });
    }

    pub fn clear_error(&self) {
        self.store.with_value(SessionStore::clear_error);
    }
}

/// Provides auth context and hydrates the session once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let store = SessionStore::new(HttpBackend);
    let auth = AuthContext::new(store.clone());
    let session = auth.session;

    let subscription = store.subscribe(move |state| session.set(state.clone()));
    let subscription = StoredValue::new_local(Some(subscription));
    on_cleanup(move || {
        subscription.try_update_value(|slot| drop(slot.take()));
    });

    provide_context(auth);

    spawn_local(async move { store.hydrate().await });

    view! { {children()} }
}

/// Returns the current auth context or a fallback anonymous context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| {
        let context = AuthContext::new(SessionStore::new(HttpBackend));
        context.session.update(|state| state.hydrated = true);
        context
    })
}
