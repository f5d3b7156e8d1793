mod about;
mod dashboard;
mod home;
mod login;
mod not_found;
pub(crate) mod paths;
mod reset_password;
mod signup;

pub(crate) use about::AboutPage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use home::HomePage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use reset_password::ResetPasswordPage;
pub(crate) use signup::SignUpPage;

use crate::components::layout::{ProtectedLayout, PublicLayout};
use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <ParentRoute path=path!("") view=PublicLayout>
                <Route path=path!("") view=HomePage />
                <Route path=path!("about") view=AboutPage />
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("signup") view=SignUpPage />
                <Route path=path!("reset-password") view=ResetPasswordPage />
            </ParentRoute>
            <ParentRoute path=path!("dashboard") view=ProtectedLayout>
                <Route path=path!("") view=DashboardPage />
            </ParentRoute>
        </Routes>
    }
}
