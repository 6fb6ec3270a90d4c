//! SVG output
//!
//! Serializes a `Scene` into SVG markup. The live page gets class names and
//! ids it can style and hook events to; exports get every style inlined (see
//! `export`).

pub mod export;

pub use export::export_svg;

use super::format_number;
use super::scene::*;
use super::theme::{Style, Theme};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Markup for the live page; styling comes from the page's stylesheet
pub fn render_svg(scene: &Scene) -> String {
    SvgWriter::new(None).write(scene)
}

/// Escape text and attribute content
pub(crate) fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Builds markup for a scene, optionally inlining a theme
pub(crate) struct SvgWriter<'a> {
    theme: Option<&'a Theme>,
    out: String,
}

impl<'a> SvgWriter<'a> {
    pub(crate) fn new(theme: Option<&'a Theme>) -> Self {
        Self { theme, out: String::new() }
    }

    pub(crate) fn write(mut self, scene: &Scene) -> String {
        self.out.push_str(&format!(
            r#"<svg xmlns="{}" id="fretboard" width="{}" height="{}">"#,
            SVG_NS,
            format_number(scene.width),
            format_number(scene.height)
        ));

        match &scene.content {
            SceneContent::Diagram(diagram) => self.diagram(diagram),
            SceneContent::Error(error) => self.error(error),
        }

        self.out.push_str("</svg>");
        self.out
    }

    /// `style` attribute for inline mode; `None` drops the element entirely
    fn style(&self, style: impl FnOnce(&Theme) -> Style) -> Option<String> {
        match self.theme {
            None => Some(String::new()),
            Some(theme) => {
                let style = style(theme);
                if style.is_invisible() {
                    None
                } else {
                    Some(format!(r#" style="{}""#, style.to_css()))
                }
            }
        }
    }

    fn diagram(&mut self, diagram: &Diagram) {
        if let Some(style) = self.style(|t| t.frets()) {
            self.out.push_str(&format!(
                r#"<path class="frets" d="{}"{}/>"#,
                diagram.frets.d, style
            ));
        }

        self.out.push_str(r#"<g class="strings">"#);
        for string in &diagram.strings {
            // live strings still need their width; it is not a class property
            let style = match self.theme {
                None => format!(r#" style="stroke-width: {};""#, format_number(string.stroke_width)),
                Some(theme) => format!(r#" style="{}""#, theme.string(string.stroke_width).to_css()),
            };
            self.out.push_str(&format!(r#"<path class="string" d="{}"{}/>"#, string.d, style));
        }
        self.out.push_str("</g>");

        self.out.push_str(r#"<g class="fretMarkers">"#);
        for marker in &diagram.fret_markers {
            let Some(style) = self.style(|t| t.fret_marker()) else { continue };
            self.out.push_str(&format!(
                r#"<g id="{}" transform="translate({},{})"><circle r="{}"{}/></g>"#,
                xml_escape(&marker.id),
                format_number(marker.x),
                format_number(marker.y),
                format_number(marker.r),
                style
            ));
        }
        self.out.push_str("</g>");

        self.out.push_str(r#"<g class="markers">"#);
        for number in &diagram.fret_numbers {
            let Some(style) = self.style(|t| t.fret_number()) else { continue };
            self.out.push_str(&format!(
                r#"<text class="marker" x="{}" y="{}"{}>{}</text>"#,
                format_number(number.x),
                format_number(number.y),
                style,
                number.fret
            ));
        }
        self.out.push_str("</g>");

        self.out.push_str(r#"<g class="notes">"#);
        for note in &diagram.notes {
            self.note(note);
        }
        self.out.push_str("</g>");
    }

    fn note(&mut self, note: &NoteElement) {
        let attrs = &note.attributes;
        let Some(group_style) = self.style(|t| t.note(attrs)) else { return };
        let circle_style = self.style(|t| t.note_circle(attrs, note.is_open)).unwrap_or_default();
        let text_style = self.style(|t| t.note_text(attrs)).unwrap_or_default();
        let outline = if note.is_open && self.theme.is_none() { r#" stroke="none""# } else { "" };

        self.out.push_str(&format!(
            r#"<g id="{id}" class="{class}" transform="translate({x},{y})" data-x="{x}" data-y="{y}"{gs}>"#,
            id = note.id,
            class = note.class_name(),
            x = format_number(note.x),
            y = format_number(note.y),
            gs = group_style,
        ));
        self.out.push_str(&format!(
            r#"<circle r="{}"{}{}/>"#,
            format_number(note.r),
            outline,
            circle_style
        ));
        self.out.push_str(&format!(
            r#"<text data-note="{}"{}>{}</text>"#,
            xml_escape(&note.pitch_name),
            text_style,
            xml_escape(note.display_text())
        ));
        self.out.push_str("</g>");
    }

    fn error(&mut self, error: &ErrorMessage) {
        let style = self.style(|t| t.error()).unwrap_or_default();
        self.out.push_str(&format!(
            r#"<text class="error" x="{}" y="{}"{}>{}</text>"#,
            format_number(error.x),
            format_number(error.y),
            style,
            xml_escape(&error.message)
        ));
    }
}
