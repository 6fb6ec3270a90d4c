//! Fretboard layout
//!
//! Maps a `DiagramState` to a `Scene`. Layout is deterministic: the same
//! state and configuration always produce the same scene, so any change to
//! the fret window, spacing or width is handled by rendering from scratch.

use super::format_number;
use super::scene::*;
use crate::models::diagram_state::{compute_note_name, DiagramState};
use crate::models::note::NotePositionId;
use crate::models::tuning::FretboardConfig;

/// Canvas size used while an error message replaces the diagram
pub const ERROR_CANVAS_WIDTH: f32 = 800.0;
pub const ERROR_CANVAS_HEIGHT: f32 = 280.0;

/// Computes scenes for one state/config pair
pub struct FretboardRenderer<'a> {
    config: &'a FretboardConfig,
    state: &'a DiagramState,
}

impl<'a> FretboardRenderer<'a> {
    pub fn new(config: &'a FretboardConfig, state: &'a DiagramState) -> Self {
        Self { config, state }
    }

    /// Validate, then lay out the full diagram or the error scene
    pub fn render(&self) -> Scene {
        if let Err(err) = self.state.validate(&self.config.bounds) {
            log::debug!("Rendering error scene: {}", err);
            return Self::render_error(&err.to_string());
        }

        let diagram = Diagram {
            frets: self.frets(),
            strings: self.strings(),
            fret_markers: self.fret_markers(),
            fret_numbers: self.fret_numbers(),
            notes: self.notes(),
        };

        Scene {
            width: self.state.diagram_width() + 2.0 * self.config.offset_x,
            height: self.canvas_height(),
            content: SceneContent::Diagram(diagram),
        }
    }

    /// Fixed-size scene carrying only `message`
    pub fn render_error(message: &str) -> Scene {
        Scene {
            width: ERROR_CANVAS_WIDTH,
            height: ERROR_CANVAS_HEIGHT,
            content: SceneContent::Error(ErrorMessage {
                message: message.to_string(),
                x: ERROR_CANVAS_WIDTH / 2.0,
                y: ERROR_CANVAS_HEIGHT / 2.0,
            }),
        }
    }

    fn fretboard_height(&self) -> f32 {
        self.state.fretboard_height(self.config.num_strings())
    }

    fn canvas_height(&self) -> f32 {
        self.config.offset_y * 2.0 + self.fretboard_height() + self.config.padding_y
    }

    fn string_y(&self, string: usize) -> f32 {
        self.config.offset_y + self.state.string_spacing * string as f32
    }

    /// Center x of the column right below fret `fret` (relative to the window)
    fn column_x(&self, relative_fret: i32) -> f32 {
        self.config.offset_x + self.state.fret_width / 2.0 + self.state.fret_width * relative_fret as f32
    }

    /// One path of `num_frets + 1` vertical strokes alternating down and up
    fn frets(&self) -> FretPath {
        let height = self.fretboard_height();
        let mut segments = vec![format!(
            "M {} {}",
            format_number(self.config.offset_x),
            format_number(self.config.offset_y)
        )];
        for i in 0..=self.state.num_frets() {
            let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
            segments.push(format!("v {}", format_number(direction * height)));
            segments.push(format!("m {} 0", format_number(self.state.fret_width)));
        }
        FretPath { d: segments.join(" ") }
    }

    fn strings(&self) -> Vec<StringLine> {
        (0..self.config.num_strings())
            .map(|i| StringLine {
                index: i,
                d: format!(
                    "M {} {} h {}",
                    format_number(self.config.offset_x),
                    format_number(self.string_y(i)),
                    format_number(self.state.diagram_width())
                ),
                stroke_width: self.config.min_string_size * (i + 1) as f32,
            })
            .collect()
    }

    fn fret_markers(&self) -> Vec<FretMarker> {
        let center = self.config.num_strings() as f32 / 2.0 - 0.5;
        let y = self.config.offset_y + self.state.string_spacing * center;
        let r = self.config.circle_radius / 1.5;

        let mut markers = Vec::new();
        for fret in self.config.visible_markers(self.state.start_fret, self.state.end_fret) {
            let relative = fret - self.state.start_fret;
            let x = self.column_x(relative - 1);
            let id = format!("fret-marker-{}", relative);

            if self.config.is_double_marker(fret) {
                let spread = self.config.double_marker_spread;
                markers.push(FretMarker { id: format!("{}-a", id), x, y: y - spread, r });
                markers.push(FretMarker { id: format!("{}-b", id), x, y: y + spread, r });
            } else {
                markers.push(FretMarker { id, x, y, r });
            }
        }
        markers
    }

    fn fret_numbers(&self) -> Vec<FretNumber> {
        let y = self.config.offset_y + self.fretboard_height() + self.state.string_spacing;
        self.config
            .visible_markers(self.state.start_fret, self.state.end_fret)
            .map(|fret| FretNumber {
                fret,
                x: self.column_x(fret - 1 - self.state.start_fret),
                y,
            })
            .collect()
    }

    /// Open strings first, then every `(fret, string)` in the window
    fn notes(&self) -> Vec<NoteElement> {
        let num_strings = self.config.num_strings();
        let mut notes = Vec::with_capacity(num_strings * (self.state.num_frets() as usize + 1));

        for string in 0..num_strings {
            notes.push(self.note(NotePositionId::open(string), self.config.offset_x / 2.0, self.string_y(string)));
        }
        for fret in self.state.start_fret..self.state.end_fret {
            for string in 0..num_strings {
                let x = self.column_x(fret - self.state.start_fret);
                notes.push(self.note(NotePositionId::fretted(fret, string), x, self.string_y(string)));
            }
        }
        notes
    }

    fn note(&self, id: NotePositionId, x: f32, y: f32) -> NoteElement {
        NoteElement {
            id,
            x,
            y,
            r: self.config.circle_radius,
            is_open: id.is_open(),
            pitch_name: compute_note_name(self.config, self.state.enharmonic, id.fret(), id.string()).to_string(),
            attributes: self.state.notes.resolve(&id, self.state.default_visibility),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::note::{NoteColor, NotePatch, Visibility};

    fn state(start: i32, end: i32) -> (FretboardConfig, DiagramState) {
        let config = FretboardConfig::default();
        let mut state = DiagramState::new(&config, 1920.0);
        state.start_fret = start;
        state.end_fret = end;
        (config, state)
    }

    #[test]
    fn test_fret_path_zigzag() {
        let (config, state) = state(0, 2);
        let scene = FretboardRenderer::new(&config, &state).render();
        let diagram = scene.diagram().unwrap();
        assert_eq!(diagram.frets.d, "M 40 30 v 200 m 70 0 v -200 m 70 0 v 200 m 70 0");
    }

    #[test]
    fn test_strings_get_thicker() {
        let (config, state) = state(0, 12);
        let scene = FretboardRenderer::new(&config, &state).render();
        let strings = &scene.diagram().unwrap().strings;
        assert_eq!(strings.len(), 6);
        assert_eq!(strings[0].d, "M 40 30 h 840");
        assert_eq!(strings[5].d, "M 40 230 h 840");
        assert!(strings.windows(2).all(|w| w[0].stroke_width < w[1].stroke_width));
    }

    #[test]
    fn test_markers_in_window() {
        let (config, state) = state(3, 12);
        let scene = FretboardRenderer::new(&config, &state).render();
        let diagram = scene.diagram().unwrap();

        // 3 is the start fret and excluded; 12 is doubled
        let numbers: Vec<i32> = diagram.fret_numbers.iter().map(|n| n.fret).collect();
        assert_eq!(numbers, vec![5, 7, 9, 12]);
        assert_eq!(diagram.fret_markers.len(), 5);

        let twelve: Vec<&FretMarker> = diagram
            .fret_markers
            .iter()
            .filter(|m| m.id.starts_with("fret-marker-9"))
            .collect();
        assert_eq!(twelve.len(), 2);
        assert_eq!(twelve[0].x, twelve[1].x);
        assert_eq!(twelve[1].y - twelve[0].y, 80.0);
    }

    #[test]
    fn test_single_marker_position() {
        let (config, state) = state(0, 5);
        let scene = FretboardRenderer::new(&config, &state).render();
        let marker = &scene.diagram().unwrap().fret_markers[0];
        assert_eq!(marker.id, "fret-marker-3");
        assert_eq!(marker.x, 40.0 + 35.0 + 140.0);
        assert_eq!(marker.y, 130.0);
        assert_eq!(marker.r, 12.0);
    }

    #[test]
    fn test_note_positions() {
        let (config, state) = state(2, 5);
        let scene = FretboardRenderer::new(&config, &state).render();

        let open = scene.note(&NotePositionId::open(1)).unwrap();
        assert_eq!((open.x, open.y), (20.0, 70.0));
        assert!(open.is_open);
        assert_eq!(open.pitch_name, "B");

        let fretted = scene.note(&NotePositionId::fretted(2, 0)).unwrap();
        assert_eq!((fretted.x, fretted.y), (75.0, 30.0));
        assert_eq!(fretted.pitch_name, "G");

        assert!(scene.note(&NotePositionId::fretted(5, 0)).is_none());
        assert!(scene.note(&NotePositionId::fretted(1, 0)).is_none());
    }

    #[test]
    fn test_notes_restored_from_registry() {
        let (config, mut state) = state(0, 12);
        let id = NotePositionId::fretted(4, 3);
        let default = state.default_visibility;
        state.notes.update_note(id, &NotePatch::color(NoteColor::Pink), default);
        state.notes.update_note(id, &NotePatch::visibility(Visibility::Visible), default);

        let scene = FretboardRenderer::new(&config, &state).render();
        let note = scene.note(&id).unwrap();

        assert_eq!(note.class_name(), "note pink visible");
    }

    #[test]
    fn test_canvas_size() {
        let (config, state) = state(0, 12);
        let scene = FretboardRenderer::new(&config, &state).render();
        assert_eq!(scene.width, 840.0 + 80.0);
        assert_eq!(scene.height, 60.0 + 200.0 + 20.0);
    }

    #[test]
    fn test_invalid_window_renders_error() {
        let (config, state) = state(5, 3);
        let scene = FretboardRenderer::new(&config, &state).render();
        let error = scene.error().unwrap();
        assert_eq!(error.message, "End fret must not be smaller than start fret!");
        assert_eq!(scene.width, ERROR_CANVAS_WIDTH);
        assert!(scene.notes().is_empty());
    }
}
