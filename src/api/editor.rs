//! JavaScript-facing fretboard editor
//!
//! `FretboardApp` is created once per page and owned by JS. Every action
//! method returns the serialized `EditOutcome` after the URL has already been
//! updated; the page only has to apply the scene update.

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, deserialize_or_default, parse_color, parse_note_id, serialize};
use super::url::{apply_url_state, confirm, read_state_param, viewport_width};
use crate::editor::{EditOutcome, FretboardEditor, UrlState};
use crate::models::diagram_state::{FretSizeChange, FretWindowChange};
use crate::models::tuning::FretboardConfig;
use crate::renderers::theme::Theme;
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

const RESET_CONFIRMATION: &str = "Do you really want to reset your diagram?";

#[wasm_bindgen]
pub struct FretboardApp {
    editor: FretboardEditor,
    theme: Theme,
}

#[wasm_bindgen]
impl FretboardApp {
    /// Create the editor for the current viewport
    ///
    /// `config` is an optional partial `FretboardConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FretboardApp, JsValue> {
        let config: FretboardConfig = deserialize_or_default(config, "Invalid fretboard config")?;
        let width = viewport_width();
        wasm_info!("FretboardApp created for viewport {}px", width);
        Ok(FretboardApp {
            editor: FretboardEditor::new(config, width),
            theme: Theme::default(),
        })
    }

    /// Load the diagram shared through `?state=`
    ///
    /// Returns whether a state was restored. A malformed parameter is removed
    /// from the URL and reported as an error; the editor stays usable with
    /// its defaults.
    #[wasm_bindgen(js_name = restoreFromUrl)]
    pub fn restore_from_url(&mut self) -> Result<bool, JsValue> {
        let param = read_state_param();
        match self.editor.restore(param.as_deref()) {
            Ok(restored) => Ok(restored),
            Err(err) => {
                wasm_warn!("Shared diagram could not be restored: {}", err);
                apply_url_state(&UrlState::Clear)?;
                Err(JsValue::from_str(&err.to_string()))
            }
        }
    }

    /// Current scene as a JS object
    pub fn scene(&self) -> Result<JsValue, JsValue> {
        serialize(self.editor.scene(), "Failed to serialize scene")
    }

    /// Current scene as class-styled SVG markup
    pub fn svg(&self) -> String {
        self.editor.svg()
    }

    /// Values for the sliders, inputs and toggle labels
    pub fn controls(&self) -> Result<JsValue, JsValue> {
        serialize(&self.editor.controls(), "Failed to serialize controls")
    }

    #[wasm_bindgen(js_name = selectNote)]
    pub fn select_note(&mut self, note_id: &str) -> Result<JsValue, JsValue> {
        let id = parse_note_id(note_id)?;
        let outcome = self.editor.select_note(id);
        self.finish(outcome)
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.editor.clear_selection();
        self.finish(outcome)
    }

    #[wasm_bindgen(js_name = changeColor)]
    pub fn change_color(&mut self, color: &str) -> Result<JsValue, JsValue> {
        let color = parse_color(color)?;
        let outcome = self.editor.change_color(color);
        self.finish(outcome)
    }

    #[wasm_bindgen(js_name = deleteSelectedNote)]
    pub fn delete_selected_note(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.editor.delete_selected_note();
        self.finish(outcome)
    }

    #[wasm_bindgen(js_name = toggleEnharmonic)]
    pub fn toggle_enharmonic(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.editor.toggle_enharmonic();
        self.finish(outcome)
    }

    #[wasm_bindgen(js_name = toggleDefaultVisibility)]
    pub fn toggle_default_visibility(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.editor.toggle_default_visibility();
        self.finish(outcome)
    }

    /// Reset after `window.confirm`; returns `null` when the user declines
    #[wasm_bindgen(js_name = resetDiagram)]
    pub fn reset_diagram(&mut self) -> Result<JsValue, JsValue> {
        if !confirm(RESET_CONFIRMATION) {
            wasm_log!("Reset cancelled");
            return Ok(JsValue::NULL);
        }
        let outcome = self.editor.reset_diagram();
        self.finish(outcome)
    }

    /// `{start?, end?}` with `start` 0-based
    #[wasm_bindgen(js_name = changeFretWindow)]
    pub fn change_fret_window(&mut self, change: JsValue) -> Result<JsValue, JsValue> {
        let change: FretWindowChange = deserialize(change, "Invalid fret window")?;
        let outcome = self.editor.change_fret_window(change);
        self.finish(outcome)
    }

    /// `{width?, height?}` where `height` is the string spacing
    #[wasm_bindgen(js_name = changeFretSize)]
    pub fn change_fret_size(&mut self, change: JsValue) -> Result<JsValue, JsValue> {
        let change: FretSizeChange = deserialize(change, "Invalid fret size")?;
        let outcome = self.editor.change_fret_size(change);
        self.finish(outcome)
    }

    /// Overlay geometry for editing the selected label, or `null`
    #[wasm_bindgen(js_name = beginLabelEdit)]
    pub fn begin_label_edit(&mut self) -> Result<JsValue, JsValue> {
        match self.editor.begin_label_edit() {
            Some(overlay) => serialize(&overlay, "Failed to serialize label editor"),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = commitLabelEdit)]
    pub fn commit_label_edit(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let outcome = self.editor.commit_label_edit(text);
        self.finish(outcome)
    }

    /// Dispatch a `KeyboardEvent.code`
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, code: &str) -> Result<JsValue, JsValue> {
        let outcome = self.editor.handle_key(code);
        self.finish(outcome)
    }

    /// Self-contained SVG for download; clears the selection first
    #[wasm_bindgen(js_name = exportSvg)]
    pub fn export_svg(&mut self) -> Result<String, JsValue> {
        let (svg, outcome) = self.editor.export_svg(&self.theme);
        apply_url_state(&outcome.url)?;
        Ok(svg)
    }

    fn finish(&self, outcome: EditOutcome) -> Result<JsValue, JsValue> {
        if let Err(err) = apply_url_state(&outcome.url) {
            wasm_error!("Failed to update URL: {:?}", err);
        }
        serialize(&outcome, "Failed to serialize edit outcome")
    }
}
