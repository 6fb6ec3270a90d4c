//! WASM build test
//!
//! Exercises the JS-facing `FretboardApp` in a browser.

#![cfg(target_arch = "wasm32")]

use fretboard_wasm::api::FretboardApp;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_app_creation_with_default_config() {
    let app = FretboardApp::new(JsValue::UNDEFINED);
    assert!(app.is_ok());
}

#[wasm_bindgen_test]
fn test_svg_contains_open_strings() {
    let app = FretboardApp::new(JsValue::NULL).unwrap();
    let svg = app.svg();
    assert!(svg.contains(r#"id="o-s0""#));
    assert!(svg.contains(r#"id="o-s5""#));
}

#[wasm_bindgen_test]
fn test_select_and_color_updates_url() {
    let mut app = FretboardApp::new(JsValue::UNDEFINED).unwrap();
    app.select_note("f0-s0").unwrap();
    app.change_color("blue").unwrap();

    let search = web_sys::window().unwrap().location().search().unwrap();
    assert!(search.contains("state="));
}

#[wasm_bindgen_test]
fn test_invalid_arguments_are_rejected() {
    let mut app = FretboardApp::new(JsValue::UNDEFINED).unwrap();
    assert!(app.select_note("not-a-note").is_err());
    assert!(app.change_color("magenta").is_err());
}

#[wasm_bindgen_test]
fn test_export_has_xml_header() {
    let mut app = FretboardApp::new(JsValue::UNDEFINED).unwrap();
    let svg = app.export_svg().unwrap();
    assert!(svg.starts_with("<?xml"));
}
