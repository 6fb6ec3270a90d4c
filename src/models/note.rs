//! Note identity and attributes
//!
//! A note is addressed by its fretboard position (`NotePositionId`) and
//! carries three independent axes: kind, color and visibility, plus an
//! optional label overriding the computed pitch name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Deterministic identifier of a fretboard position
///
/// Open strings render as `o-s{string}`, fretted positions as
/// `f{fret}-s{string}`. The id is always computed from the position and
/// never stored apart from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NotePositionId {
    Open { string: usize },
    Fretted { fret: i32, string: usize },
}

impl NotePositionId {
    pub fn open(string: usize) -> Self {
        NotePositionId::Open { string }
    }

    pub fn fretted(fret: i32, string: usize) -> Self {
        NotePositionId::Fretted { fret, string }
    }

    pub fn string(&self) -> usize {
        match self {
            NotePositionId::Open { string } | NotePositionId::Fretted { string, .. } => *string,
        }
    }

    /// Fret index used for pitch computation; open strings sit at -1
    pub fn fret(&self) -> i32 {
        match self {
            NotePositionId::Open { .. } => -1,
            NotePositionId::Fretted { fret, .. } => *fret,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, NotePositionId::Open { .. })
    }
}

impl fmt::Display for NotePositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotePositionId::Open { string } => write!(f, "o-s{}", string),
            NotePositionId::Fretted { fret, string } => write!(f, "f{}-s{}", fret, string),
        }
    }
}

/// Error returned when a string is not a valid note position id
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid note id '{0}'")]
pub struct ParseNoteIdError(pub String);

impl FromStr for NotePositionId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseNoteIdError(s.to_string());
        let (position, string) = s.split_once("-s").ok_or_else(err)?;
        let string: usize = parse_index(string).ok_or_else(err)?;

        if position == "o" {
            return Ok(NotePositionId::Open { string });
        }

        let fret = position
            .strip_prefix('f')
            .and_then(parse_index)
            .ok_or_else(err)?;
        let fret = i32::try_from(fret).map_err(|_| err())?;
        Ok(NotePositionId::Fretted { fret, string })
    }
}

/// Plain decimal digits only; rejects signs, whitespace and empty input
fn parse_index(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl Serialize for NotePositionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NotePositionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Element kind of a registry entry (only notes today)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    #[default]
    Note,
}

impl NoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteKind::Note => "note",
        }
    }
}

/// Named note colors, in color-code order
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoteColor {
    #[default]
    White,
    Red,
    Orange,
    Yellow,
    Brown,
    LightGreen,
    Green,
    Pink,
    Purple,
    Blue,
    Teal,
    LimeGreen,
    Black,
    DarkGray,
    Gray,
}

impl NoteColor {
    pub const ALL: [NoteColor; 15] = [
        NoteColor::White,
        NoteColor::Red,
        NoteColor::Orange,
        NoteColor::Yellow,
        NoteColor::Brown,
        NoteColor::LightGreen,
        NoteColor::Green,
        NoteColor::Pink,
        NoteColor::Purple,
        NoteColor::Blue,
        NoteColor::Teal,
        NoteColor::LimeGreen,
        NoteColor::Black,
        NoteColor::DarkGray,
        NoteColor::Gray,
    ];

    /// CSS class / palette button title of the color
    pub fn name(&self) -> &'static str {
        match self {
            NoteColor::White => "white",
            NoteColor::Red => "red",
            NoteColor::Orange => "orange",
            NoteColor::Yellow => "yellow",
            NoteColor::Brown => "brown",
            NoteColor::LightGreen => "light_green",
            NoteColor::Green => "green",
            NoteColor::Pink => "pink",
            NoteColor::Purple => "purple",
            NoteColor::Blue => "blue",
            NoteColor::Teal => "teal",
            NoteColor::LimeGreen => "lime_green",
            NoteColor::Black => "black",
            NoteColor::DarkGray => "dark_gray",
            NoteColor::Gray => "gray",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|color| color.name() == name)
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visibility of a single note
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Invisible until hovered
    Transparent,
    /// Never shown
    Hidden,
    Visible,
    /// Visible and currently selected; at most one note at a time
    Selected,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Transparent => "transparent",
            Visibility::Hidden => "hidden",
            Visibility::Visible => "visible",
            Visibility::Selected => "selected",
        }
    }

    /// Visible or selected: the note was explicitly marked by the user
    pub fn is_marked(&self) -> bool {
        matches!(self, Visibility::Visible | Visibility::Selected)
    }
}

/// Fallback visibility for notes the user has not marked
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DefaultVisibility {
    Hidden,
    #[default]
    Transparent,
}

impl DefaultVisibility {
    pub fn toggled(self) -> Self {
        match self {
            DefaultVisibility::Hidden => DefaultVisibility::Transparent,
            DefaultVisibility::Transparent => DefaultVisibility::Hidden,
        }
    }
}

impl From<DefaultVisibility> for Visibility {
    fn from(value: DefaultVisibility) -> Self {
        match value {
            DefaultVisibility::Hidden => Visibility::Hidden,
            DefaultVisibility::Transparent => Visibility::Transparent,
        }
    }
}

/// Attributes stored per note in the registry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteAttributes {
    pub kind: NoteKind,
    pub color: NoteColor,
    pub visibility: Visibility,

    /// User label; `None` displays the computed pitch name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_text: Option<String>,
}

impl NoteAttributes {
    /// Attributes of a note nobody has touched yet
    pub fn with_default(default_visibility: DefaultVisibility) -> Self {
        Self {
            kind: NoteKind::Note,
            color: NoteColor::White,
            visibility: default_visibility.into(),
            label_text: None,
        }
    }

    /// Space-separated class projection `"{kind} {color} {visibility}"`
    pub fn class_name(&self) -> String {
        format!("{} {} {}", self.kind.as_str(), self.color.name(), self.visibility.as_str())
    }

    /// Text shown in the note circle
    pub fn display_text<'a>(&'a self, pitch_name: &'a str) -> &'a str {
        self.label_text.as_deref().unwrap_or(pitch_name)
    }
}

/// What a patch does with the label
#[derive(Clone, Debug, PartialEq, Default)]
pub enum LabelUpdate {
    #[default]
    Keep,
    Set(String),
    /// Fall back to the computed pitch name
    Clear,
}

/// Partial update merged field-by-field into `NoteAttributes`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct NotePatch {
    pub kind: Option<NoteKind>,
    pub color: Option<NoteColor>,
    pub visibility: Option<Visibility>,
    pub label: LabelUpdate,
}

impl NotePatch {
    pub fn color(color: NoteColor) -> Self {
        Self { color: Some(color), ..Default::default() }
    }

    pub fn visibility(visibility: Visibility) -> Self {
        Self { visibility: Some(visibility), ..Default::default() }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self { label: LabelUpdate::Set(text.into()), ..Default::default() }
    }

    /// Everything back to defaults; used for deleting a note
    pub fn reset(default_visibility: DefaultVisibility) -> Self {
        Self {
            kind: Some(NoteKind::Note),
            color: Some(NoteColor::White),
            visibility: Some(default_visibility.into()),
            label: LabelUpdate::Clear,
        }
    }

    /// Merge into `attrs`; unspecified fields stay untouched
    pub fn apply_to(&self, attrs: &mut NoteAttributes) {
        if let Some(kind) = self.kind {
            attrs.kind = kind;
        }
        if let Some(color) = self.color {
            attrs.color = color;
        }
        if let Some(visibility) = self.visibility {
            attrs.visibility = visibility;
        }
        match &self.label {
            LabelUpdate::Keep => {}
            LabelUpdate::Set(text) => attrs.label_text = Some(text.clone()),
            LabelUpdate::Clear => attrs.label_text = None,
        }
    }
}
