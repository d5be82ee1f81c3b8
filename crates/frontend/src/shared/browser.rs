//! Thin wrappers over `window` used by the URL synchronizer.
//!
//! All functions are no-ops when no window is available.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::window;

pub fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// New history entry for `?query` (back/forward restores it)
pub fn push_query(query: &str) {
    let new_url = format!("?{}", query);
    if current_search() == new_url {
        return;
    }
    if let Some(history) = window().and_then(|w| w.history().ok()) {
        if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&new_url)) {
            log::warn!("pushState failed: {:?}", e);
        }
    }
}

/// Rewrite the current history entry without adding a new one
pub fn replace_query(query: &str) {
    let new_url = format!("?{}", query);
    if let Some(history) = window().and_then(|w| w.history().ok()) {
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&new_url)) {
            log::warn!("replaceState failed: {:?}", e);
        }
    }
}

pub fn scroll_to_top() {
    if let Some(w) = window() {
        w.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// Run `handler` on every back/forward navigation
pub fn on_popstate(handler: impl Fn() + 'static) {
    let Some(w) = window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn Fn()>);
    if let Err(e) = w.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
    {
        log::warn!("Failed to attach popstate listener: {:?}", e);
    }
    // the listener lives as long as the page
    closure.forget();
}
