//! Visual theme used when inlining styles for export
//!
//! The live page styles the diagram through its stylesheet using the class
//! names on each element. An exported image has no stylesheet, so the same
//! look is reproduced here as explicit properties per element.

use crate::models::note::{NoteAttributes, NoteColor, Visibility};

/// Ordered list of CSS properties for one element
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Style {
    props: Vec<(&'static str, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.props.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.props.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
    }

    /// Fully transparent elements are dropped from exports
    pub fn is_invisible(&self) -> bool {
        self.get("opacity").and_then(|value| value.parse::<f32>().ok()) == Some(0.0)
    }

    /// `prop: value;` pairs joined by spaces
    pub fn to_css(&self) -> String {
        self.props
            .iter()
            .map(|(key, value)| format!("{}: {};", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Colors and font settings of the diagram
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub line_color: String,
    pub marker_color: String,
    pub fret_width: f32,
    pub note_stroke_width: f32,
    pub selected_stroke_color: String,
    pub selected_stroke_width: f32,
    pub error_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            line_color: "#000000".to_string(),
            marker_color: "#dddddd".to_string(),
            fret_width: 2.0,
            note_stroke_width: 1.0,
            selected_stroke_color: "#ff5500".to_string(),
            selected_stroke_width: 3.0,
            error_color: "#cc0000".to_string(),
        }
    }
}

/// Fill of a note circle
pub fn color_fill(color: NoteColor) -> &'static str {
    match color {
        NoteColor::White => "#ffffff",
        NoteColor::Red => "#e6194b",
        NoteColor::Orange => "#f58231",
        NoteColor::Yellow => "#ffe119",
        NoteColor::Brown => "#9a6324",
        NoteColor::LightGreen => "#aaffc3",
        NoteColor::Green => "#3cb44b",
        NoteColor::Pink => "#fabed4",
        NoteColor::Purple => "#911eb4",
        NoteColor::Blue => "#4363d8",
        NoteColor::Teal => "#469990",
        NoteColor::LimeGreen => "#bfef45",
        NoteColor::Black => "#000000",
        NoteColor::DarkGray => "#555555",
        NoteColor::Gray => "#a9a9a9",
    }
}

/// Label color readable on top of `color_fill(color)`
pub fn color_text(color: NoteColor) -> &'static str {
    match color {
        NoteColor::Brown
        | NoteColor::Green
        | NoteColor::Purple
        | NoteColor::Blue
        | NoteColor::Teal
        | NoteColor::Black
        | NoteColor::DarkGray
        | NoteColor::Red => "#ffffff",
        _ => "#000000",
    }
}

fn opacity(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Transparent | Visibility::Hidden => "0",
        Visibility::Visible | Visibility::Selected => "1",
    }
}

impl Theme {
    pub fn frets(&self) -> Style {
        Style::new()
            .with("fill", "none")
            .with("stroke", self.line_color.clone())
            .with("stroke-width", crate::renderers::format_number(self.fret_width))
            .with("opacity", "1")
    }

    pub fn string(&self, stroke_width: f32) -> Style {
        Style::new()
            .with("fill", "none")
            .with("stroke", self.line_color.clone())
            .with("stroke-width", crate::renderers::format_number(stroke_width))
            .with("opacity", "1")
    }

    pub fn fret_marker(&self) -> Style {
        Style::new()
            .with("fill", self.marker_color.clone())
            .with("stroke", "none")
            .with("opacity", "1")
    }

    pub fn fret_number(&self) -> Style {
        Style::new()
            .with("fill", self.line_color.clone())
            .with("text-anchor", "middle")
            .with("dominant-baseline", "central")
            .with("opacity", "1")
    }

    /// Style of the note group; carries the opacity of the whole token
    pub fn note(&self, attrs: &NoteAttributes) -> Style {
        Style::new().with("opacity", opacity(attrs.visibility))
    }

    pub fn note_circle(&self, attrs: &NoteAttributes, is_open: bool) -> Style {
        let (stroke, width) = match (attrs.visibility, is_open) {
            (Visibility::Selected, _) => (self.selected_stroke_color.clone(), self.selected_stroke_width),
            (_, true) => ("none".to_string(), 0.0),
            _ => (self.line_color.clone(), self.note_stroke_width),
        };
        Style::new()
            .with("fill", color_fill(attrs.color))
            .with("stroke", stroke)
            .with("stroke-width", crate::renderers::format_number(width))
            .with("opacity", "1")
    }

    pub fn note_text(&self, attrs: &NoteAttributes) -> Style {
        Style::new()
            .with("fill", color_text(attrs.color))
            .with("text-anchor", "middle")
            .with("dominant-baseline", "central")
            .with("opacity", "1")
    }

    pub fn error(&self) -> Style {
        Style::new()
            .with("fill", self.error_color.clone())
            .with("text-anchor", "middle")
            .with("dominant-baseline", "central")
            .with("opacity", "1")
    }
}
