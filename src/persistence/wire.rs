//! Compact URL wire format
//!
//! The `state` query parameter is base64url-encoded JSON:
//!
//! ```json
//! {"visibility":"transparent","startFret":0,"endFret":12,"enharmonic":0,
//!  "stringSpacing":40,"fretWidth":70,
//!  "encodedNotes":{"f3-s0":{"c":"9","noteText":"Cmaj"}}}
//! ```
//!
//! Only marked notes (visible or selected) are written, each as a one
//! character color code plus an optional label. They always decode as
//! `visible`; everything else comes back as the reset default.

use crate::errors::{FretboardError, Result};
use crate::models::diagram_state::{validate_fret_size, validate_fret_window, DiagramState, EnharmonicMode};
use crate::models::note::{DefaultVisibility, NoteAttributes, NoteColor, NoteKind, NotePositionId, Visibility};
use crate::models::registry::NoteRegistry;
use crate::models::tuning::FretboardConfig;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Color name ↔ code table; the position in this array is the code's value
const COLOR_CODES: [(char, NoteColor); 15] = [
    ('0', NoteColor::White),
    ('1', NoteColor::Red),
    ('2', NoteColor::Orange),
    ('3', NoteColor::Yellow),
    ('4', NoteColor::Brown),
    ('5', NoteColor::LightGreen),
    ('6', NoteColor::Green),
    ('7', NoteColor::Pink),
    ('8', NoteColor::Purple),
    ('9', NoteColor::Blue),
    ('A', NoteColor::Teal),
    ('B', NoteColor::LimeGreen),
    ('C', NoteColor::Black),
    ('D', NoteColor::DarkGray),
    ('E', NoteColor::Gray),
];

pub fn color_code(color: NoteColor) -> char {
    COLOR_CODES
        .iter()
        .find(|(_, c)| *c == color)
        .map(|(code, _)| *code)
        .unwrap_or('0')
}

pub fn color_from_code(code: &str) -> Option<NoteColor> {
    let mut chars = code.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    COLOR_CODES.iter().find(|(c, _)| *c == first).map(|(_, color)| *color)
}

/// A persisted note: color code and optional label
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EncodedNote {
    pub c: String,

    #[serde(rename = "noteText", default, skip_serializing_if = "Option::is_none")]
    pub note_text: Option<String>,
}

/// JSON shape of the `state` parameter
///
/// Size fields are optional on read so links created before the size
/// sliders existed still open with the configured defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WireState {
    pub visibility: DefaultVisibility,
    pub start_fret: i32,
    pub end_fret: i32,
    pub enharmonic: EnharmonicMode,

    #[serde(default)]
    pub string_spacing: Option<f32>,

    #[serde(default)]
    pub fret_width: Option<f32>,

    #[serde(default)]
    pub encoded_notes: BTreeMap<NotePositionId, EncodedNote>,
}

impl WireState {
    /// Minimal form of `state`: no selection, only marked notes
    pub fn from_state(state: &DiagramState) -> Self {
        let encoded_notes = state
            .notes
            .iter()
            .filter(|(_, attrs)| attrs.visibility.is_marked())
            .map(|(id, attrs)| {
                let note = EncodedNote {
                    c: color_code(attrs.color).to_string(),
                    note_text: attrs.label_text.clone().filter(|text| !text.trim().is_empty()),
                };
                (*id, note)
            })
            .collect();

        Self {
            visibility: state.default_visibility,
            start_fret: state.start_fret,
            end_fret: state.end_fret,
            enharmonic: state.enharmonic,
            string_spacing: Some(state.string_spacing),
            fret_width: Some(state.fret_width),
            encoded_notes,
        }
    }

    /// Validate and expand into a full state
    pub fn into_state(self, config: &FretboardConfig) -> Result<DiagramState> {
        validate_fret_window(self.start_fret, self.end_fret).map_err(malformed)?;

        let string_spacing = self.string_spacing.unwrap_or(config.bounds.string_spacing.default);
        let fret_width = self.fret_width.unwrap_or(config.bounds.fret_width.default);
        validate_fret_size(&config.bounds, string_spacing, fret_width).map_err(malformed)?;

        let mut notes = NoteRegistry::new();
        for (id, encoded) in self.encoded_notes {
            if id.string() >= config.num_strings() {
                log::warn!("Ignoring shared note {} on a string this tuning does not have", id);
                continue;
            }
            let color = color_from_code(&encoded.c)
                .ok_or_else(|| malformed(format!("unknown color code '{}' for note {}", encoded.c, id)))?;
            let attrs = NoteAttributes {
                kind: NoteKind::Note,
                color,
                visibility: Visibility::Visible,
                label_text: encoded.note_text.filter(|text| !text.trim().is_empty()),
            };
            notes.insert(id, attrs);
        }

        Ok(DiagramState {
            selected_note: None,
            default_visibility: self.visibility,
            start_fret: self.start_fret,
            end_fret: self.end_fret,
            string_spacing,
            fret_width,
            enharmonic: self.enharmonic,
            notes,
        })
    }
}

fn malformed(err: impl ToString) -> FretboardError {
    FretboardError::MalformedSharedState(err.to_string())
}

/// Encode `state` as a `state` query parameter value
pub fn encode_state(state: &DiagramState) -> Result<String> {
    let json = serde_json::to_vec(&WireState::from_state(state)).map_err(malformed)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a `state` query parameter value
///
/// Accepts the URL-safe alphabet with or without padding as well as the
/// standard alphabet older links were written with.
pub fn decode_state(param: &str, config: &FretboardConfig) -> Result<DiagramState> {
    let normalized: String = param
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = URL_SAFE_NO_PAD.decode(normalized.as_bytes()).map_err(malformed)?;
    let wire: WireState = serde_json::from_slice(&bytes).map_err(malformed)?;
    wire.into_state(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use crate::models::note::NotePatch;

    fn config() -> FretboardConfig {
        FretboardConfig::default()
    }

    #[test]
    fn test_color_code_table_is_bijective() {
        for color in NoteColor::ALL {
            let code = color_code(color).to_string();
            assert_eq!(color_from_code(&code), Some(color));
        }
        assert_eq!(color_code(NoteColor::Blue), '9');
        assert_eq!(color_code(NoteColor::Gray), 'E');
        assert_eq!(color_from_code("F"), None);
        assert_eq!(color_from_code("10"), None);
        assert_eq!(color_from_code(""), None);
    }

    #[test]
    fn test_encode_skips_unmarked_notes_and_selection() {
        let config = config();
        let mut state = DiagramState::new(&config, 1920.0);
        let default = state.default_visibility;
        let selected = NotePositionId::fretted(3, 0);
        state.notes.update_note(selected, &NotePatch::visibility(Visibility::Selected), default);
        state.notes.update_note(NotePositionId::fretted(4, 0), &NotePatch::color(NoteColor::Red), default);
        state.selected_note = Some(selected);

        let wire = WireState::from_state(&state);

        assert_eq!(wire.encoded_notes.len(), 1);
        assert!(wire.encoded_notes.contains_key(&selected));
        let json = serde_json::to_string(&wire).unwrap();
        assert!(!json.contains("selected"));
    }

    #[test]
    fn test_encode_drops_blank_labels() {
        let config = config();
        let mut state = DiagramState::new(&config, 1920.0);
        let default = state.default_visibility;
        let id = NotePositionId::fretted(2, 1);
        state.notes.update_note(id, &NotePatch::visibility(Visibility::Visible), default);
        state.notes.update_note(id, &NotePatch::label("  "), default);

        let wire = WireState::from_state(&state);
        assert_eq!(wire.encoded_notes[&id].note_text, None);

        let restored = decode_state(&encode_state(&state).unwrap(), &config).unwrap();
        assert_eq!(restored.notes.get(&id), Some(&NoteAttributes { label_text: None, ..state.notes.get(&id).unwrap().clone() }));
    }

    #[test]
    fn test_wire_json_shape() {
        let config = config();
        let mut state = DiagramState::new(&config, 1920.0);
        let default = state.default_visibility;
        let id = NotePositionId::fretted(3, 0);
        state.notes.update_note(id, &NotePatch::visibility(Visibility::Visible), default);
        state.notes.update_note(id, &NotePatch::color(NoteColor::Blue), default);
        state.notes.update_note(id, &NotePatch::label("Cmaj"), default);

        let json = serde_json::to_value(WireState::from_state(&state)).unwrap();

        assert_eq!(json["visibility"], "transparent");
        assert_eq!(json["enharmonic"], 0);
        assert_eq!(json["encodedNotes"]["f3-s0"]["c"], "9");
        assert_eq!(json["encodedNotes"]["f3-s0"]["noteText"], "Cmaj");
    }

    #[test]
    fn test_decode_accepts_standard_alphabet_with_padding() {
        let json = r#"{"visibility":"hidden","startFret":2,"endFret":9,"enharmonic":1,"encodedNotes":{"o-s5":{"c":"C"}}}"#;
        let param = STANDARD.encode(json);

        let state = decode_state(&param, &config()).unwrap();

        assert_eq!(state.default_visibility, DefaultVisibility::Hidden);
        assert_eq!((state.start_fret, state.end_fret), (2, 9));
        assert_eq!(state.enharmonic, EnharmonicMode::Flat);
        assert_eq!(state.fret_width, 70.0);
        let note = state.notes.get(&NotePositionId::open(5)).unwrap();
        assert_eq!(note.color, NoteColor::Black);
        assert_eq!(note.visibility, Visibility::Visible);
    }

    #[test]
    fn test_decode_ignores_legacy_derived_fields() {
        let json = r#"{"selected":null,"visibility":"transparent","startFret":0,"endFret":12,"enharmonic":0,"numFrets":12,"fretboardWidth":840,"fretHeight":200,"encodedNotes":{}}"#;
        let state = decode_state(&URL_SAFE_NO_PAD.encode(json), &config()).unwrap();
        assert_eq!(state.num_frets(), 12);
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        let config = config();
        let cases = [
            "%%%not-base64%%%".to_string(),
            URL_SAFE_NO_PAD.encode("{not json"),
            URL_SAFE_NO_PAD.encode(r#"{"visibility":"transparent","startFret":5,"endFret":3,"enharmonic":0}"#),
            URL_SAFE_NO_PAD.encode(r#"{"visibility":"transparent","startFret":0,"endFret":5,"enharmonic":0,"encodedNotes":{"f1-s1":{"c":"Z"}}}"#),
            URL_SAFE_NO_PAD.encode(r#"{"visibility":"transparent","startFret":0,"endFret":5,"enharmonic":0,"encodedNotes":{"bogus":{"c":"1"}}}"#),
            URL_SAFE_NO_PAD.encode(r#"{"visibility":"transparent","startFret":0,"endFret":5,"enharmonic":0,"fretWidth":1}"#),
        ];
        for param in cases {
            assert!(
                matches!(decode_state(&param, &config), Err(FretboardError::MalformedSharedState(_))),
                "{} should be rejected",
                param
            );
        }
    }

    #[test]
    fn test_decode_drops_notes_on_missing_strings() {
        let json = r#"{"visibility":"transparent","startFret":0,"endFret":5,"enharmonic":0,"encodedNotes":{"f1-s9":{"c":"1"},"f1-s1":{"c":"1"}}}"#;
        let state = decode_state(&URL_SAFE_NO_PAD.encode(json), &config()).unwrap();
        assert_eq!(state.notes.len(), 1);
    }
}
