#![allow(warnings)]
//! Anfragen Frontend Entry Point

mod models;
mod presentation;
mod record_store;
mod controller;
mod commands;
mod store;
mod context;
mod components;
mod app;
mod logging;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(App);
}
