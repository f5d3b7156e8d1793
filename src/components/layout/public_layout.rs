use crate::app_lib::{build_info, theme::Theme};
use crate::components::layout::AppShell;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::{A, Outlet};

/// Shell for pages anyone may open, with a footer pointing at the build info.
#[component]
pub fn PublicLayout() -> impl IntoView {
    view! {
        <AppShell>
            <Outlet />
            <footer class="mt-16 border-t border-gray-200 pt-6 text-center text-xs text-gray-500 dark:border-gray-700 dark:text-gray-400">
                "Gatehouse v" {build_info::version()} " · "
                <A href=paths::ABOUT {..} class=Theme::LINK>
                    "About this build"
                </A>
            </footer>
        </AppShell>
    }
}
