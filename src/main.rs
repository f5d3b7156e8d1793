// Views only build for the browser; the session logic below them also builds
// natively so it can be tested with the host toolchain. A native non-test
// build has no entry point into that logic.

#[cfg(target_arch = "wasm32")]
mod app;
#[path = "lib/mod.rs"]
#[cfg_attr(not(any(target_arch = "wasm32", test)), allow(dead_code))]
mod app_lib;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg_attr(not(any(target_arch = "wasm32", test)), allow(dead_code))]
mod features;
#[cfg(target_arch = "wasm32")]
mod routes;

#[cfg(target_arch = "wasm32")]
use crate::app::App;
#[cfg(target_arch = "wasm32")]
use crate::app_lib::{build_info, config::AppConfig, logging};
#[cfg(target_arch = "wasm32")]
use leptos::prelude::mount_to_body;

#[cfg(target_arch = "wasm32")]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    logging::init(&config.log_level);
    tracing::info!(
        version = build_info::version(),
        commit = build_info::git_commit_hash(),
        "starting gatehouse web"
    );

    mount_to_body(App);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
