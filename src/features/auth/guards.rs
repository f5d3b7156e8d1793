use crate::components::Spinner;
use crate::features::auth::state::use_auth;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Renders `children` for signed-in users and sends anonymous visitors to the
/// login page once the session lookup finished.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if !auth.is_loading.get() && !auth.is_authenticated.get() {
            // UX-only guard; real access control must live on the API.
            navigate(paths::LOGIN, Default::default());
        }
    });

    view! {
        <Show
            when=move || auth.is_authenticated.get()
            fallback=|| view! { <div class="flex justify-center mt-10"><Spinner /></div> }
        >
            {children()}
        </Show>
    }
}
