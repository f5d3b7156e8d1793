//! Client-side route paths shared by links, guards, and redirects.

pub const HOME: &str = "/";
pub const ABOUT: &str = "/about";
pub const LOGIN: &str = "/login";
pub const SIGNUP: &str = "/signup";
pub const RESET_PASSWORD: &str = "/reset-password";
pub const DASHBOARD: &str = "/dashboard";
