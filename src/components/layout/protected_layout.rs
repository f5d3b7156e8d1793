use crate::components::layout::AppShell;
use crate::features::auth::RequireAuth;
use leptos::prelude::*;
use leptos_router::components::Outlet;

/// Route wrapper for pages that need a signed-in user.
#[component]
pub fn ProtectedLayout() -> impl IntoView {
    view! {
        <AppShell>
            <RequireAuth>
                <Outlet />
            </RequireAuth>
        </AppShell>
    }
}
