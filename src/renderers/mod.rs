//! Renderers module for the fretboard diagram
//!
//! `fretboard` lays out a `Scene` from the diagram state; `svg` turns a
//! scene into markup, either class-styled for the live page or with styles
//! inlined for image export.

pub mod scene;
pub mod fretboard;
pub mod theme;
pub mod svg;

pub use scene::*;
pub use fretboard::{FretboardRenderer, ERROR_CANVAS_HEIGHT, ERROR_CANVAS_WIDTH};
pub use theme::{Style, Theme};
pub use svg::{render_svg, export_svg};

/// Format a coordinate for markup: at most two decimals, no trailing zeros
pub fn format_number(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // also catches -0
        return "0".to_string();
    }
    format!("{}", rounded)
}
