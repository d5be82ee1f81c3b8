pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;

use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = shared::config::load_config();
    leptos::mount::mount_to_body(move || view! { <app::App config=config /> });
}
