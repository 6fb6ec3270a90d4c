//! Fretboard editor
//!
//! `FretboardEditor` owns the state store and the current scene and exposes
//! one method per user action. Each action runs to completion (validate,
//! mutate, redraw or patch, persist) and reports what the page has to do in
//! an `EditOutcome`.

pub mod keys;
pub mod label_edit;

pub use keys::{key_action, KeyAction};
pub use label_edit::{normalize_label, LabelEditor};

use crate::errors::Result;
use crate::models::diagram_state::{DiagramState, FretSizeChange, FretWindowChange};
use crate::models::note::{DefaultVisibility, NoteColor, NotePatch, NotePositionId, Visibility};
use crate::models::tuning::{FretboardConfig, ENHARMONIC_SIGNS};
use crate::persistence::StateStore;
use crate::renderers::scene::{NoteView, Scene};
use crate::renderers::theme::Theme;
use crate::renderers::{export_svg, render_svg, FretboardRenderer};
use serde::{Deserialize, Serialize};

/// How the page should bring its drawing up to date
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum SceneUpdate {
    /// Nothing visible changed
    None,
    /// Geometry changed: erase everything and draw this scene
    Redraw(Scene),
    /// Only these notes changed; patch their class and text in place
    Notes(Vec<NoteView>),
}

/// What to do with the `state` URL parameter after an action
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "param", rename_all = "camelCase")]
pub enum UrlState {
    Unchanged,
    /// Replace the parameter with this encoded state
    Save(String),
    /// Remove the parameter
    Clear,
}

/// Result of one user action
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditOutcome {
    pub scene: SceneUpdate,
    pub url: UrlState,
}

impl EditOutcome {
    pub fn unchanged() -> Self {
        Self { scene: SceneUpdate::None, url: UrlState::Unchanged }
    }
}

/// Values the control widgets should display
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ControlValues {
    /// 1-based, as shown on the start fret input
    pub start_fret: i32,
    pub end_fret: i32,
    pub string_spacing: f32,
    pub fret_width: f32,
    pub fret_height_gauge: f32,
    pub fret_width_gauge: f32,
    /// Glyph of the mode a click on the toggle switches to
    pub enharmonic_label: String,
    pub default_visibility: DefaultVisibility,
}

/// Owned editor instance: state store, current scene and label overlay
#[derive(Clone, Debug)]
pub struct FretboardEditor {
    store: StateStore,
    scene: Scene,
    label_editor: Option<LabelEditor>,
}

impl FretboardEditor {
    pub fn new(config: FretboardConfig, viewport_width: f32) -> Self {
        let store = StateStore::new(config, viewport_width);
        let scene = FretboardRenderer::new(store.config(), store.state()).render();
        Self { store, scene, label_editor: None }
    }

    pub fn state(&self) -> &DiagramState {
        self.store.state()
    }

    pub fn config(&self) -> &FretboardConfig {
        self.store.config()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn label_editor(&self) -> Option<&LabelEditor> {
        self.label_editor.as_ref()
    }

    /// Class-styled SVG markup of the current scene
    pub fn svg(&self) -> String {
        render_svg(&self.scene)
    }

    /// Apply the shared `state` parameter, if any, and redraw
    ///
    /// On `MalformedSharedState` the editor is back at its defaults and the
    /// caller should drop the parameter from the URL.
    pub fn restore(&mut self, raw: Option<&str>) -> Result<bool> {
        let result = self.store.restore(raw);
        self.redraw();
        result
    }

    // ========================================================================
    // Note mutation protocol
    // ========================================================================

    /// Merge `patch` into the registry and mirror it onto the drawn note
    ///
    /// Returns the in-place view, or `None` when the note is not on screen.
    pub fn update_note(&mut self, id: NotePositionId, patch: &NotePatch) -> Option<NoteView> {
        let default = self.store.state().default_visibility;
        let attrs = self.store.state_mut().notes.update_note(id, patch, default).clone();
        let element = self.scene.note_mut(&id)?;
        element.attributes = attrs;
        Some(element.view())
    }

    /// Select `id`, demoting the previous selection first
    pub fn select_note(&mut self, id: NotePositionId) -> EditOutcome {
        if self.scene.note(&id).is_none() {
            log::warn!("Ignoring selection of {} which is not drawn", id);
            return EditOutcome::unchanged();
        }

        let mut views = Vec::new();
        let previous = self.store.state().selected_note;
        if let Some(previous) = previous.filter(|previous| *previous != id) {
            views.extend(self.update_note(previous, &NotePatch::visibility(Visibility::Visible)));
        }
        views.extend(self.update_note(id, &NotePatch::visibility(Visibility::Selected)));
        self.store.state_mut().selected_note = Some(id);
        log::debug!("Selected {}", id);

        self.notes_changed(views)
    }

    /// Demote the selection to visible; selection is never persisted
    pub fn clear_selection(&mut self) -> EditOutcome {
        let Some(selected) = self.store.state_mut().selected_note.take() else {
            return EditOutcome::unchanged();
        };
        self.label_editor = None;
        let views: Vec<NoteView> = self
            .update_note(selected, &NotePatch::visibility(Visibility::Visible))
            .into_iter()
            .collect();
        EditOutcome { scene: SceneUpdate::Notes(views), url: UrlState::Unchanged }
    }

    pub fn change_color(&mut self, color: NoteColor) -> EditOutcome {
        let Some(selected) = self.store.state().selected_note else {
            return EditOutcome::unchanged();
        };
        let views = self.update_note(selected, &NotePatch::color(color)).into_iter().collect();
        self.notes_changed(views)
    }

    /// Reset the selected note to defaults and drop the selection
    pub fn delete_selected_note(&mut self) -> EditOutcome {
        let Some(selected) = self.store.state_mut().selected_note.take() else {
            return EditOutcome::unchanged();
        };
        self.label_editor = None;
        let default = self.store.state().default_visibility;
        let views = self.update_note(selected, &NotePatch::reset(default)).into_iter().collect();
        log::debug!("Deleted note {}", selected);
        self.notes_changed(views)
    }

    /// Run the binding for `code` against the selected note
    pub fn handle_key(&mut self, code: &str) -> EditOutcome {
        if self.store.state().selected_note.is_none() {
            return EditOutcome::unchanged();
        }
        match key_action(code) {
            Some(KeyAction::Delete) => self.delete_selected_note(),
            Some(KeyAction::Color(color)) => self.change_color(color),
            None => EditOutcome::unchanged(),
        }
    }

    // ========================================================================
    // Label editing
    // ========================================================================

    /// Open the overlay over the selected note
    pub fn begin_label_edit(&mut self) -> Option<LabelEditor> {
        let selected = self.store.state().selected_note?;
        let editor = LabelEditor::over(self.scene.note(&selected)?);
        self.label_editor = Some(editor.clone());
        Some(editor)
    }

    /// Close the overlay, storing `text` unless it is blank
    pub fn commit_label_edit(&mut self, text: &str) -> EditOutcome {
        let Some(editor) = self.label_editor.take() else {
            return EditOutcome::unchanged();
        };

        match normalize_label(text) {
            Some(label) => {
                let views = self.update_note(editor.note_id, &NotePatch::label(label)).into_iter().collect();
                self.notes_changed(views)
            }
            None => {
                // blank entry: show whatever the note displayed before
                let views = self.scene.note(&editor.note_id).map(|note| note.view()).into_iter().collect();
                EditOutcome { scene: SceneUpdate::Notes(views), url: UrlState::Unchanged }
            }
        }
    }

    // ========================================================================
    // Diagram-wide settings
    // ========================================================================

    pub fn toggle_enharmonic(&mut self) -> EditOutcome {
        let state = self.store.state_mut();
        state.enharmonic = state.enharmonic.toggled();
        self.redrawn()
    }

    /// Flip the default between hidden and transparent for all unmarked notes
    pub fn toggle_default_visibility(&mut self) -> EditOutcome {
        let state = self.store.state_mut();
        state.default_visibility = state.default_visibility.toggled();
        let default = state.default_visibility;
        state.notes.apply_default_visibility(default);

        let views: Vec<NoteView> = match &mut self.scene.content {
            crate::renderers::SceneContent::Diagram(diagram) => diagram
                .notes
                .iter_mut()
                .filter(|note| !note.attributes.visibility.is_marked())
                .map(|note| {
                    note.attributes.visibility = default.into();
                    note.view()
                })
                .collect(),
            crate::renderers::SceneContent::Error(_) => Vec::new(),
        };
        self.notes_changed(views)
    }

    /// Back to viewport defaults; the caller confirms with the user first
    pub fn reset_diagram(&mut self) -> EditOutcome {
        self.store.reset();
        self.redraw();
        log::info!("Diagram reset");
        EditOutcome { scene: SceneUpdate::Redraw(self.scene.clone()), url: UrlState::Clear }
    }

    /// Move the fret window; invalid values are kept and shown as an error
    pub fn change_fret_window(&mut self, change: FretWindowChange) -> EditOutcome {
        let state = self.store.state_mut();
        state.start_fret = change.start.unwrap_or(state.start_fret);
        state.end_fret = change.end.unwrap_or(state.end_fret);
        self.redrawn()
    }

    /// Resize frets and strings; invalid values are kept and shown as an error
    pub fn change_fret_size(&mut self, change: FretSizeChange) -> EditOutcome {
        let state = self.store.state_mut();
        state.fret_width = change.width.unwrap_or(state.fret_width);
        state.string_spacing = change.height.unwrap_or(state.string_spacing);
        self.redrawn()
    }

    // ========================================================================
    // Read-back and export
    // ========================================================================

    pub fn controls(&self) -> ControlValues {
        let state = self.store.state();
        let bounds = &self.store.config().bounds;
        ControlValues {
            start_fret: state.start_fret.saturating_add(1),
            end_fret: state.end_fret,
            string_spacing: state.string_spacing,
            fret_width: state.fret_width,
            fret_height_gauge: state.string_spacing - bounds.string_spacing.min,
            fret_width_gauge: state.fret_width - bounds.fret_width.min,
            enharmonic_label: ENHARMONIC_SIGNS[state.enharmonic.toggled().index()].to_string(),
            default_visibility: state.default_visibility,
        }
    }

    /// Clear the selection, then export the scene with inlined styles
    pub fn export_svg(&mut self, theme: &Theme) -> (String, EditOutcome) {
        let outcome = self.clear_selection();
        (export_svg(&self.scene, theme), outcome)
    }

    /// Current encoded state, when the diagram is drawable
    pub fn encoded_state(&self) -> Option<String> {
        if self.scene.is_error() {
            return None;
        }
        match self.store.save() {
            Ok(param) => Some(param),
            Err(err) => {
                log::error!("Failed to encode state: {}", err);
                None
            }
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn redraw(&mut self) {
        self.scene = FretboardRenderer::new(self.store.config(), self.store.state()).render();
        self.label_editor = None;
    }

    fn redrawn(&mut self) -> EditOutcome {
        self.redraw();
        EditOutcome { scene: SceneUpdate::Redraw(self.scene.clone()), url: self.persist() }
    }

    fn notes_changed(&self, views: Vec<NoteView>) -> EditOutcome {
        EditOutcome { scene: SceneUpdate::Notes(views), url: self.persist() }
    }

    /// Invalid layouts are never written to the URL
    fn persist(&self) -> UrlState {
        match self.encoded_state() {
            Some(param) => UrlState::Save(param),
            None => UrlState::Unchanged,
        }
    }
}
