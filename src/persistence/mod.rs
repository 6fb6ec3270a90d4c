//! State store
//!
//! Owns the canonical `DiagramState` together with the configuration and
//! viewport it was created for, and translates it to and from the `state`
//! URL parameter.

pub mod wire;

pub use wire::{color_code, color_from_code, decode_state, encode_state, EncodedNote, WireState};

use crate::errors::Result;
use crate::models::diagram_state::DiagramState;
use crate::models::tuning::FretboardConfig;

/// Name of the URL query parameter carrying the shared state
pub const STATE_PARAM: &str = "state";

/// Explicitly owned state store; handed by reference to renderer and editor
#[derive(Clone, Debug)]
pub struct StateStore {
    config: FretboardConfig,
    viewport_width: f32,
    state: DiagramState,
}

impl StateStore {
    /// Fresh store with viewport-adapted defaults
    pub fn new(config: FretboardConfig, viewport_width: f32) -> Self {
        let state = DiagramState::new(&config, viewport_width);
        Self { config, viewport_width, state }
    }

    pub fn config(&self) -> &FretboardConfig {
        &self.config
    }

    pub fn state(&self) -> &DiagramState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DiagramState {
        &mut self.state
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Restore every field to the viewport-adapted defaults and drop all notes
    pub fn reset(&mut self) {
        self.state = DiagramState::new(&self.config, self.viewport_width);
        log::debug!(
            "State reset: frets {}..{} for viewport {}px",
            self.state.start_fret,
            self.state.end_fret,
            self.viewport_width
        );
    }

    /// Apply a shared `state` parameter
    ///
    /// Returns `Ok(false)` when there is nothing to restore. A parameter that
    /// fails to decode leaves the store at its defaults and is reported as
    /// `MalformedSharedState`.
    pub fn restore(&mut self, raw: Option<&str>) -> Result<bool> {
        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            return Ok(false);
        };

        match decode_state(raw, &self.config) {
            Ok(state) => {
                log::info!("Restored shared state with {} marked notes", state.notes.len());
                self.state = state;
                Ok(true)
            }
            Err(err) => {
                log::warn!("Discarding shared state: {}", err);
                self.reset();
                Err(err)
            }
        }
    }

    /// Encode the current state as a `state` parameter value
    pub fn save(&self) -> Result<String> {
        encode_state(&self.state)
    }
}
