//! Glue between `FretboardApp` and the page
//!
//! Console output for the JS surface, conversion of control payloads and
//! edit outcomes through serde-wasm-bindgen, and parsing of the note ids and
//! color names the page sends.

use wasm_bindgen::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::note::{NoteColor, NotePositionId};

/// Marks messages that come from the fretboard module in the browser console
const CONSOLE_PREFIX: &str = "[fretboard]";

// ============================================================================
// Browser console
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = debug)]
    fn console_debug(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = info)]
    fn console_info(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

/// `console.debug` with `format!` arguments
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// `console.info` with `format!` arguments
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// `console.warn` with `format!` arguments
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// `console.error` with `format!` arguments
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    console_debug(&format!("{} {}", CONSOLE_PREFIX, msg));
}

pub fn log_info(msg: &str) {
    console_info(&format!("{} {}", CONSOLE_PREFIX, msg));
}

pub fn log_warn(msg: &str) {
    console_warn(&format!("{} {}", CONSOLE_PREFIX, msg));
}

pub fn log_error(msg: &str) {
    console_error(&format!("{} {}", CONSOLE_PREFIX, msg));
}

// ============================================================================
// Payload conversion
// ============================================================================

/// Reject a payload with `"<what>: <serde message>"`, logged and returned to JS
fn payload_error(what: &str, err: serde_wasm_bindgen::Error) -> JsValue {
    let msg = format!("{}: {}", what, err);
    log_error(&msg);
    JsValue::from_str(&msg)
}

/// Read a control payload (`{start?, end?}`, `{width?, height?}`, config)
pub fn deserialize<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|err| payload_error(what, err))
}

/// Like `deserialize`, but a missing argument means `T::default()`
pub fn deserialize_or_default<T: DeserializeOwned + Default>(value: JsValue, what: &str) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    deserialize(value, what)
}

/// Hand a scene, outcome or control snapshot to JS as a plain object
pub fn serialize<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| payload_error(what, err))
}

// ============================================================================
// Page arguments
// ============================================================================

/// Parse a note element id coming from the page
pub fn parse_note_id(note_id: &str) -> Result<NotePositionId, JsValue> {
    note_id.parse().map_err(|e| validation_error(format!("{}", e)))
}

/// Parse a palette color name (the `title` of a color button)
pub fn parse_color(name: &str) -> Result<NoteColor, JsValue> {
    NoteColor::from_name(name).ok_or_else(|| validation_error(format!("Unknown color '{}'", name)))
}

/// Convert a validation error to a JsValue
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    log_error(&msg);
    JsValue::from_str(&msg)
}
