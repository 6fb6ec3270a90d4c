//! Fretboard Diagram WASM Module
//!
//! Interactive guitar fretboard diagrams: the diagram state and its URL
//! encoding, the note registry, the layout of the fretboard scene, and the
//! SVG output used both by the page and for image export.

pub mod errors;
pub mod models;
pub mod persistence;
pub mod renderers;
pub mod editor;
pub mod api;

// Re-export commonly used types
pub use errors::{FretboardError, FretSizeError, FretWindowError};
pub use models::*;
pub use persistence::StateStore;
pub use editor::{EditOutcome, FretboardEditor, SceneUpdate, UrlState};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        let _ = console_log::init_with_level(log::Level::Debug);
    }

    log::info!("Fretboard diagram WASM module initialized");
}
