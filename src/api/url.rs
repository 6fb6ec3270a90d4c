//! Browser location access
//!
//! Reads the shared `state` parameter and rewrites it in place with
//! `history.replaceState`, so saving never reloads the page or adds a
//! history entry.

use wasm_bindgen::prelude::*;
use web_sys::{Url, UrlSearchParams, Window};

use crate::editor::UrlState;
use crate::persistence::STATE_PARAM;

/// Viewport width used when the window is unavailable
const FALLBACK_VIEWPORT_WIDTH: f32 = 1024.0;

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))
}

/// Value of the `state` query parameter, if present
pub fn read_state_param() -> Option<String> {
    let search = window().ok()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get(STATE_PARAM)
}

/// Carry out what an action decided about the URL
pub fn apply_url_state(url_state: &UrlState) -> Result<(), JsValue> {
    match url_state {
        UrlState::Unchanged => Ok(()),
        UrlState::Save(param) => replace_state_param(Some(param.as_str())),
        UrlState::Clear => replace_state_param(None),
    }
}

fn replace_state_param(value: Option<&str>) -> Result<(), JsValue> {
    let window = window()?;
    let url = Url::new(&window.location().href()?)?;
    let params = url.search_params();
    match value {
        Some(value) => params.set(STATE_PARAM, value),
        None => params.delete(STATE_PARAM),
    }
    window.history()?.replace_state_with_url(&JsValue::NULL, "", Some(&url.href()))
}

/// `window.innerWidth` in pixels
pub fn viewport_width() -> f32 {
    window()
        .ok()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .map(|width| width as f32)
        .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
}

/// Ask the user through `window.confirm`; `false` when no window exists
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|window| window.confirm_with_message(message))
        .unwrap_or(false)
}
