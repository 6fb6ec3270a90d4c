//! Tuning and layout constants
//!
//! Pure data describing the instrument (string intervals, marker frets,
//! note-name tables) and the numeric layout bounds the diagram is drawn with.
//! Nothing here mutates; `FretboardConfig` is built once and shared by the
//! state store and the renderer.

use serde::{Deserialize, Serialize};

/// Highest fret the fret window may reach
pub const MAX_FRET: i32 = 22;

/// Maximum number of fret columns displayed at once
pub const MAX_VISIBLE_FRETS: i32 = 16;

/// Upper bound for the viewport-derived end fret on reset
pub const DEFAULT_END_FRET: i32 = 12;

/// Pitch names indexed by semitone above E, sharp spelling first then flat
pub const NOTE_NAMES: [[&str; 12]; 2] = [
    ["E", "F", "F#", "G", "G#", "A", "A#", "B", "C", "C#", "D", "D#"],
    ["E", "F", "Gb", "G", "Ab", "A", "Bb", "B", "C", "Db", "D", "Eb"],
];

/// Accidental glyphs shown on the enharmonic toggle, indexed like `NOTE_NAMES`
pub const ENHARMONIC_SIGNS: [&str; 2] = ["♯", "♭"];

/// Min/max/default for a slider-driven dimension
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl Bounds {
    pub fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Whether `value` lies inside `[min, max]`
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Configured ranges for the two size sliders
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBounds {
    /// Horizontal distance between two frets
    pub fret_width: Bounds,

    /// Vertical distance between two strings
    pub string_spacing: Bounds,
}

impl Default for LayoutBounds {
    fn default() -> Self {
        Self {
            fret_width: Bounds::new(30.0, 100.0, 70.0),
            string_spacing: Bounds::new(20.0, 60.0, 40.0),
        }
    }
}

/// Complete static configuration of the fretboard diagram
///
/// Every field has a default, so a JS caller may pass a partial object
/// (or nothing at all) to the constructor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FretboardConfig {
    /// Semitones above low E for each string, top string first
    pub string_intervals: Vec<i32>,

    /// Frets carrying an inlay dot
    pub markers: Vec<i32>,

    /// Marker frets drawn with two dots instead of one
    pub double_markers: Vec<i32>,

    /// Left/right margin of the fretboard inside the canvas
    pub offset_x: f32,

    /// Top margin of the fretboard inside the canvas
    pub offset_y: f32,

    /// Extra room below the fret numbers
    pub padding_y: f32,

    /// Stroke width of the thinnest string; string `i` gets `(i + 1)` times this
    pub min_string_size: f32,

    /// Radius of a note circle
    pub circle_radius: f32,

    /// Vertical distance of each dot of a double marker from the center line
    pub double_marker_spread: f32,

    pub bounds: LayoutBounds,
}

impl Default for FretboardConfig {
    fn default() -> Self {
        Self {
            string_intervals: vec![24, 19, 15, 10, 5, 0],
            markers: vec![3, 5, 7, 9, 12, 15, 17, 19, 21],
            double_markers: vec![12, 24],
            offset_x: 40.0,
            offset_y: 30.0,
            padding_y: 20.0,
            min_string_size: 0.2,
            circle_radius: 18.0,
            double_marker_spread: 40.0,
            bounds: LayoutBounds::default(),
        }
    }
}

impl FretboardConfig {
    pub fn num_strings(&self) -> usize {
        self.string_intervals.len()
    }

    /// Markers visible in the window `(start, end]`
    pub fn visible_markers(&self, start_fret: i32, end_fret: i32) -> impl Iterator<Item = i32> + '_ {
        self.markers
            .iter()
            .copied()
            .filter(move |&fret| fret > start_fret && fret <= end_fret)
    }

    pub fn is_double_marker(&self, fret: i32) -> bool {
        self.double_markers.contains(&fret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_six_strings() {
        let config = FretboardConfig::default();
        assert_eq!(config.num_strings(), 6);
        assert_eq!(config.string_intervals[5], 0);
    }

    #[test]
    fn test_visible_markers_excludes_start_fret() {
        let config = FretboardConfig::default();
        let markers: Vec<i32> = config.visible_markers(3, 9).collect();
        assert_eq!(markers, vec![5, 7, 9]);
    }

    #[test]
    fn test_partial_config_from_json_uses_defaults() {
        let config: FretboardConfig = serde_json::from_str(r#"{"circleRadius": 12}"#).unwrap();
        assert_eq!(config.circle_radius, 12.0);
        assert_eq!(config.offset_x, 40.0);
        assert_eq!(config.bounds, LayoutBounds::default());
    }

    #[test]
    fn test_bounds_contains_is_inclusive() {
        let bounds = Bounds::new(20.0, 60.0, 40.0);
        assert!(bounds.contains(20.0));
        assert!(bounds.contains(60.0));
        assert!(!bounds.contains(61.0));
    }
}
