//! Fretboard editor WASM API
//!
//! - `helpers`: console logging macros, serde conversions, argument parsing
//! - `url`: `?state=` access through `window.location` / `history`
//! - `editor`: the `FretboardApp` class exported to JavaScript

pub mod helpers;
pub mod url;
pub mod editor;

pub use editor::FretboardApp;
