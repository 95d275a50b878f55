//! Todo Gate Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod identity;
mod models;
mod router;
mod store;
mod sync;

use app::App;
use leptos::prelude::*;
use tracing::Level;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init_logger("TodoGate", Level::DEBUG) {
        web_sys::console::error_1(&e.into());
    }
    mount_to_body(App);
}
