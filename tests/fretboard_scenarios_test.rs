// End-to-end scenarios for the fretboard editor: rendering, selection,
// persistence through the URL parameter, and validation errors.

use fretboard_wasm::editor::{FretboardEditor, SceneUpdate, UrlState};
use fretboard_wasm::models::{
    FretSizeChange, FretWindowChange, FretboardConfig, NoteColor, NotePositionId, Visibility,
};
use fretboard_wasm::persistence::StateStore;
use rstest::rstest;

fn editor() -> FretboardEditor {
    FretboardEditor::new(FretboardConfig::default(), 1920.0)
}

fn saved_param(url: &UrlState) -> String {
    match url {
        UrlState::Save(param) => param.clone(),
        other => panic!("expected a saved state, got {:?}", other),
    }
}

#[test]
fn test_fresh_diagram_has_all_notes_in_default_state() {
    let mut editor = editor();
    editor.change_fret_window(FretWindowChange { start: Some(0), end: Some(12) });

    let notes = editor.scene().notes();
    assert_eq!(notes.iter().filter(|n| n.is_open).count(), 6);
    assert_eq!(notes.iter().filter(|n| !n.is_open).count(), 6 * 12);
    assert!(notes.iter().all(|n| n.attributes.color == NoteColor::White));
    assert!(notes.iter().all(|n| n.attributes.visibility == Visibility::Transparent));
}

#[test]
fn test_every_valid_window_renders_its_columns() {
    let mut editor = editor();
    for start in 0..22 {
        for end in (start + 1)..=(start + 16).min(22) {
            editor.change_fret_window(FretWindowChange { start: Some(start), end: Some(end) });
            let scene = editor.scene();
            assert!(!scene.is_error(), "{}..{} should be valid", start, end);
            assert_eq!(scene.fretted_columns(), (end - start) as usize);
        }
    }
}

#[rstest]
#[case(5, 3, "End fret must not be smaller than start fret!")]
#[case(4, 4, "End fret must not be smaller than start fret!")]
#[case(-1, 5, "Invalid fret value(s)!")]
#[case(0, 23, "Invalid fret value(s)!")]
#[case(23, 22, "Invalid fret value(s)!")]
#[case(0, 17, "Maximal number of displayable frets is 16, e.g., 1st to 16th or 4th to 19th!")]
#[case(2, 22, "Maximal number of displayable frets is 16, e.g., 1st to 16th or 4th to 19th!")]
fn test_invalid_window_shows_error_scene(#[case] start: i32, #[case] end: i32, #[case] message: &str) {
    let mut editor = editor();

    let outcome = editor.change_fret_window(FretWindowChange { start: Some(start), end: Some(end) });

    let scene = editor.scene();
    assert_eq!(scene.error().map(|e| e.message.as_str()), Some(message));
    assert!(scene.notes().is_empty());
    assert_eq!(outcome.url, UrlState::Unchanged);
    match outcome.scene {
        SceneUpdate::Redraw(redrawn) => assert!(redrawn.is_error()),
        other => panic!("expected redraw, got {:?}", other),
    }
}

#[test]
fn test_selected_blue_note_restores_as_visible() {
    let mut editor = editor();
    let id: NotePositionId = "f3-s0".parse().unwrap();
    editor.select_note(id);
    let outcome = editor.change_color(NoteColor::Blue);
    let param = saved_param(&outcome.url);

    let mut restored = FretboardEditor::new(FretboardConfig::default(), 1920.0);
    assert_eq!(restored.restore(Some(param.as_str())), Ok(true));

    let note = restored.scene().note(&id).unwrap();
    assert_eq!(note.attributes.color, NoteColor::Blue);
    assert_eq!(note.attributes.visibility, Visibility::Visible);
    assert_eq!(restored.state().selected_note, None);
}

#[test]
fn test_roundtrip_keeps_visible_notes_and_drops_unmarked_ones() {
    let mut editor = editor();
    editor.change_fret_window(FretWindowChange { start: Some(2), end: Some(14) });
    editor.change_fret_size(FretSizeChange { width: Some(55.0), height: Some(35.0) });
    editor.toggle_enharmonic();

    let labeled = NotePositionId::fretted(5, 2);
    editor.select_note(labeled);
    editor.change_color(NoteColor::LimeGreen);
    editor.begin_label_edit();
    editor.commit_label_edit("R");

    let plain = NotePositionId::open(4);
    editor.select_note(plain);
    editor.change_color(NoteColor::DarkGray);
    editor.clear_selection();

    let param = editor.encoded_state().unwrap();
    let mut store = StateStore::new(FretboardConfig::default(), 1920.0);
    store.restore(Some(param.as_str())).unwrap();
    let state = store.state();

    assert_eq!((state.start_fret, state.end_fret), (2, 14));
    assert_eq!((state.fret_width, state.string_spacing), (55.0, 35.0));
    assert_eq!(state.enharmonic, editor.state().enharmonic);
    assert_eq!(state.notes.len(), 2);
    for (id, attrs) in editor.state().notes.iter().filter(|(_, a)| a.visibility.is_marked()) {
        assert_eq!(state.notes.get(id), Some(attrs));
    }
}

#[test]
fn test_unmarked_colored_note_roundtrips_to_default() {
    let mut editor = editor();
    let id = NotePositionId::fretted(1, 1);
    editor.select_note(id);
    editor.change_color(NoteColor::Red);
    editor.delete_selected_note();
    let param = editor.encoded_state().unwrap();

    let mut restored = FretboardEditor::new(FretboardConfig::default(), 1920.0);
    restored.restore(Some(param.as_str())).unwrap();

    assert!(restored.state().notes.get(&id).is_none());
    let note = restored.scene().note(&id).unwrap();
    assert_eq!(note.attributes.color, NoteColor::White);
    assert_eq!(note.attributes.visibility, Visibility::Transparent);
}

#[test]
fn test_single_selection_after_many_clicks() {
    let mut editor = editor();
    let ids = ["o-s0", "f0-s1", "f3-s2", "o-s0", "f11-s5", "f3-s2", "f7-s3"];
    for id in ids {
        editor.select_note(id.parse().unwrap());
        let selected = editor
            .scene()
            .notes()
            .iter()
            .filter(|n| n.attributes.visibility == Visibility::Selected)
            .count();
        assert_eq!(selected, 1);
        assert_eq!(editor.state().notes.selected().count(), 1);
    }
}

#[test]
fn test_deleting_labeled_note_reverts_to_pitch_name() {
    let mut editor = editor();
    let id: NotePositionId = "f0-s1".parse().unwrap();
    editor.select_note(id);
    editor.change_color(NoteColor::Purple);
    editor.begin_label_edit();
    editor.commit_label_edit("Cmaj");
    assert_eq!(editor.scene().note(&id).unwrap().display_text(), "Cmaj");

    editor.select_note(id);
    let outcome = editor.delete_selected_note();

    let note = editor.scene().note(&id).unwrap();
    assert_eq!(note.display_text(), "C");
    assert_eq!(note.attributes.color, NoteColor::White);
    assert_eq!(note.attributes.visibility, Visibility::Transparent);
    assert!(editor.state().notes.get(&id).is_some());
    match outcome.scene {
        SceneUpdate::Notes(views) => {
            assert_eq!(views.len(), 1);
            assert_eq!(views[0].text, "C");
            assert_eq!(views[0].class_name, "note white transparent");
        }
        other => panic!("expected note patch, got {:?}", other),
    }
}

#[test]
fn test_keyboard_colors_selected_note() {
    let mut editor = editor();
    let id = NotePositionId::fretted(2, 3);
    editor.select_note(id);

    editor.handle_key("KeyG");
    assert_eq!(editor.scene().note(&id).unwrap().attributes.color, NoteColor::Green);

    editor.handle_key("Delete");
    assert_eq!(editor.state().selected_note, None);
    assert_eq!(editor.scene().note(&id).unwrap().attributes.color, NoteColor::White);
}

#[test]
fn test_malformed_link_falls_back_to_defaults() {
    let mut editor = editor();
    editor.change_fret_window(FretWindowChange { start: Some(4), end: Some(9) });

    let result = editor.restore(Some("definitely not a state"));

    assert!(result.is_err());
    assert_eq!(editor.state().start_fret, 0);
    assert!(!editor.scene().is_error());
}

#[test]
fn test_narrow_viewport_limits_end_fret() {
    let editor = FretboardEditor::new(FretboardConfig::default(), 400.0);
    assert_eq!(editor.state().end_fret, 4);
    assert_eq!(editor.scene().fretted_columns(), 4);
}
