//! Canonical diagram state
//!
//! `DiagramState` is the single mutable description of what is drawn. Derived
//! values (number of frets, pixel sizes) are computed on demand and never
//! stored or persisted.

use super::note::{DefaultVisibility, NotePositionId};
use super::registry::NoteRegistry;
use super::tuning::{FretboardConfig, LayoutBounds, MAX_FRET, MAX_VISIBLE_FRETS, NOTE_NAMES};
use crate::errors::{FretSizeError, FretWindowError};
use serde::{Deserialize, Serialize};

/// Accidental spelling, persisted as 0 (sharp) / 1 (flat)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
#[repr(u8)]
pub enum EnharmonicMode {
    #[default]
    Sharp = 0,
    Flat = 1,
}

impl EnharmonicMode {
    pub fn toggled(self) -> Self {
        match self {
            EnharmonicMode::Sharp => EnharmonicMode::Flat,
            EnharmonicMode::Flat => EnharmonicMode::Sharp,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Requested fret window; missing sides keep the current value
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FretWindowChange {
    #[serde(default)]
    pub start: Option<i32>,
    #[serde(default)]
    pub end: Option<i32>,
}

/// Requested fret size; `height` is the string spacing
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct FretSizeChange {
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

/// Check a fret window against the drawable range
pub fn validate_fret_window(start: i32, end: i32) -> Result<(), FretWindowError> {
    if !(0..=MAX_FRET).contains(&start) || !(1..=MAX_FRET).contains(&end) {
        return Err(FretWindowError::OutOfRange { start, end });
    }
    if end <= start {
        return Err(FretWindowError::EndBeforeStart { start, end });
    }
    if end - start > MAX_VISIBLE_FRETS {
        return Err(FretWindowError::TooWide { start, end });
    }
    Ok(())
}

/// Check spacing and width against the configured slider ranges
pub fn validate_fret_size(bounds: &LayoutBounds, string_spacing: f32, fret_width: f32) -> Result<(), FretSizeError> {
    if !bounds.string_spacing.contains(string_spacing) {
        return Err(FretSizeError::Height(string_spacing));
    }
    if !bounds.fret_width.contains(fret_width) {
        return Err(FretSizeError::Width(fret_width));
    }
    Ok(())
}

/// Complete mutable state of one diagram
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramState {
    /// At most one selected note; never persisted
    pub selected_note: Option<NotePositionId>,
    pub default_visibility: DefaultVisibility,
    pub start_fret: i32,
    pub end_fret: i32,
    pub string_spacing: f32,
    pub fret_width: f32,
    pub enharmonic: EnharmonicMode,
    pub notes: NoteRegistry,
}

impl DiagramState {
    /// Defaults for a viewport of `viewport_width` pixels
    pub fn new(config: &FretboardConfig, viewport_width: f32) -> Self {
        let fret_width = config.bounds.fret_width.default;
        Self {
            selected_note: None,
            default_visibility: DefaultVisibility::Transparent,
            start_fret: 0,
            end_fret: viewport_end_fret(config, viewport_width, fret_width),
            string_spacing: config.bounds.string_spacing.default,
            fret_width,
            enharmonic: EnharmonicMode::Sharp,
            notes: NoteRegistry::new(),
        }
    }

    pub fn num_frets(&self) -> i32 {
        self.end_fret - self.start_fret
    }

    /// Width of the fretted area in pixels
    pub fn diagram_width(&self) -> f32 {
        self.fret_width * self.num_frets() as f32
    }

    /// Distance from the top to the bottom string in pixels
    pub fn fretboard_height(&self, num_strings: usize) -> f32 {
        self.string_spacing * num_strings.saturating_sub(1) as f32
    }

    /// Pitch name at `(fret, string)`; open strings use fret -1
    pub fn compute_note_name(&self, config: &FretboardConfig, fret: i32, string: usize) -> &'static str {
        compute_note_name(config, self.enharmonic, fret, string)
    }

    /// Validate the current window and sizes
    pub fn validate(&self, bounds: &LayoutBounds) -> crate::errors::Result<()> {
        validate_fret_window(self.start_fret, self.end_fret)?;
        validate_fret_size(bounds, self.string_spacing, self.fret_width)?;
        Ok(())
    }
}

/// `min(floor((viewport - 2*offset_x) / fret_width), 12)`, never below one fret
pub fn viewport_end_fret(config: &FretboardConfig, viewport_width: f32, fret_width: f32) -> i32 {
    let fits = ((viewport_width - 2.0 * config.offset_x) / fret_width).floor();
    let fits = if fits.is_finite() { fits as i32 } else { 1 };
    fits.clamp(1, super::tuning::DEFAULT_END_FRET)
}

/// Pitch name for a position, independent of any state instance
pub fn compute_note_name(config: &FretboardConfig, mode: EnharmonicMode, fret: i32, string: usize) -> &'static str {
    let interval = config.string_intervals.get(string).copied().unwrap_or(0) + fret + 1;
    NOTE_NAMES[mode.index()][interval.rem_euclid(12) as usize]
}
