//! Self-contained SVG export
//!
//! Inlines the theme's styles (fill, stroke, stroke-width, text-anchor,
//! dominant-baseline, opacity) on every element so the file renders the same
//! without the page stylesheet. Elements with zero opacity are left out.

use super::SvgWriter;
use crate::renderers::scene::Scene;
use crate::renderers::theme::Theme;

/// Export `scene` as a standalone SVG document
pub fn export_svg(scene: &Scene, theme: &Theme) -> String {
    let markup = SvgWriter::new(Some(theme)).write(scene);
    log::debug!("Exported SVG: {} bytes", markup.len());
    format!(r#"<?xml version="1.0" encoding="UTF-8"?>{}"#, markup)
}
