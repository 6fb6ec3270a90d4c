//! Inline label editing overlay

use crate::models::note::NotePositionId;
use crate::renderers::scene::NoteElement;
use serde::{Deserialize, Serialize};

/// Text entry box placed over a note while its label is edited
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelEditor {
    pub note_id: NotePositionId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    /// Text currently displayed by the note, preselected in the box
    pub text: String,
}

impl LabelEditor {
    /// Overlay covering the circle of `note`
    pub fn over(note: &NoteElement) -> Self {
        Self {
            note_id: note.id,
            x: note.x - note.r,
            // nudged down to line up with the circle's text baseline
            y: note.y - note.r + 4.0,
            width: 2.0 * note.r,
            height: 2.0 * note.r,
            text: note.display_text().to_string(),
        }
    }
}

/// Committed label, or `None` when the entry is blank
pub fn normalize_label(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Cmaj\n"), Some("Cmaj".to_string()));
        assert_eq!(normalize_label(" \t\n"), None);
        assert_eq!(normalize_label(""), None);
    }
}
