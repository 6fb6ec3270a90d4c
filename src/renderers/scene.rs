//! Scene graph for the fretboard diagram
//!
//! The renderer produces a `Scene` holding every pre-computed coordinate,
//! path and class needed to paint the diagram. The page (or the SVG writer)
//! draws it without doing any layout of its own.

use crate::models::note::{NoteAttributes, NotePositionId};
use serde::{Deserialize, Serialize};

/// Complete rendered output
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Canvas width in pixels
    pub width: f32,

    /// Canvas height in pixels
    pub height: f32,

    pub content: SceneContent,
}

/// Either a drawable diagram or the inline validation error
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SceneContent {
    Diagram(Diagram),
    Error(ErrorMessage),
}

/// All layers of a valid diagram, in paint order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub frets: FretPath,
    pub strings: Vec<StringLine>,
    pub fret_markers: Vec<FretMarker>,
    pub fret_numbers: Vec<FretNumber>,
    pub notes: Vec<NoteElement>,
}

/// All fret lines as one zig-zag path
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FretPath {
    pub d: String,
}

/// One horizontal string
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StringLine {
    pub index: usize,
    pub d: String,
    pub stroke_width: f32,
}

/// One inlay dot
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FretMarker {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

/// Fret number printed below the fretboard
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FretNumber {
    pub fret: i32,
    pub x: f32,
    pub y: f32,
}

/// A note token: circle plus label, positioned at its center
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteElement {
    pub id: NotePositionId,
    pub x: f32,
    pub y: f32,
    pub r: f32,

    /// Open-string notes are drawn without a circle outline
    pub is_open: bool,

    /// Computed pitch name for the current enharmonic mode
    pub pitch_name: String,

    pub attributes: NoteAttributes,
}

impl NoteElement {
    pub fn class_name(&self) -> String {
        self.attributes.class_name()
    }

    pub fn display_text(&self) -> &str {
        self.attributes.display_text(&self.pitch_name)
    }

    /// The in-place patch the page applies for this note
    pub fn view(&self) -> NoteView {
        NoteView {
            id: self.id,
            class_name: self.class_name(),
            text: self.display_text().to_string(),
        }
    }
}

/// Visual delta for a note whose geometry did not change
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: NotePositionId,
    pub class_name: String,
    pub text: String,
}

/// Inline error shown instead of the diagram
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorMessage {
    pub message: String,
    pub x: f32,
    pub y: f32,
}

impl Scene {
    pub fn diagram(&self) -> Option<&Diagram> {
        match &self.content {
            SceneContent::Diagram(diagram) => Some(diagram),
            SceneContent::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorMessage> {
        match &self.content {
            SceneContent::Error(error) => Some(error),
            SceneContent::Diagram(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }

    pub fn notes(&self) -> &[NoteElement] {
        self.diagram().map(|d| d.notes.as_slice()).unwrap_or(&[])
    }

    pub fn note(&self, id: &NotePositionId) -> Option<&NoteElement> {
        self.notes().iter().find(|note| note.id == *id)
    }

    pub fn note_mut(&mut self, id: &NotePositionId) -> Option<&mut NoteElement> {
        match &mut self.content {
            SceneContent::Diagram(diagram) => diagram.notes.iter_mut().find(|note| note.id == *id),
            SceneContent::Error(_) => None,
        }
    }

    /// Number of fretted columns, counting distinct fret indices among notes
    pub fn fretted_columns(&self) -> usize {
        let mut frets: Vec<i32> = self
            .notes()
            .iter()
            .filter(|note| !note.is_open)
            .map(|note| note.id.fret())
            .collect();
        frets.sort_unstable();
        frets.dedup();
        frets.len()
    }
}
