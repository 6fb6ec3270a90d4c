//! Keyboard bindings for the selected note

use crate::models::note::NoteColor;

/// What a key press does to the selected note
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Delete,
    Color(NoteColor),
}

/// Map a `KeyboardEvent.code` to its action
pub fn key_action(code: &str) -> Option<KeyAction> {
    let action = match code {
        "Backspace" | "Delete" => KeyAction::Delete,
        "KeyB" => KeyAction::Color(NoteColor::Blue),
        "KeyD" => KeyAction::Color(NoteColor::Black),
        "KeyG" => KeyAction::Color(NoteColor::Green),
        "KeyW" => KeyAction::Color(NoteColor::White),
        "KeyR" => KeyAction::Color(NoteColor::Red),
        _ => return None,
    };
    Some(action)
}
