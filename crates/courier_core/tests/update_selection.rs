use std::path::PathBuf;
use std::sync::Once;

use courier_core::{update, AppState, FileHandle, Msg};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn image(name: &str, size: u64, modified: u64) -> FileHandle {
    FileHandle {
        path: PathBuf::from(format!("/pictures/{name}")),
        name: name.to_string(),
        size,
        last_modified_ms: modified,
        media_type: "image/png".to_string(),
    }
}

fn text_file(name: &str) -> FileHandle {
    FileHandle {
        path: PathBuf::from(format!("/documents/{name}")),
        name: name.to_string(),
        size: 64,
        last_modified_ms: 1,
        media_type: "text/plain".to_string(),
    }
}

#[test]
fn picked_files_append_in_order() {
    init_logging();
    let state = AppState::new();

    let (mut state, effects) = update(
        state,
        Msg::FilesPicked(vec![image("a.png", 10, 1), image("b.png", 20, 2)]),
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.selection_count, 2);
    assert!(view.previews_visible);
    assert!(view.action_enabled);
    assert_eq!(view.previews[0].name, "a.png");
    assert_eq!(view.previews[1].name, "b.png");
    assert!(state.consume_dirty());
}

#[test]
fn duplicate_by_name_size_and_mtime_is_rejected() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::FilesPicked(vec![image("a.png", 10, 1)]));

    let (state, _) = update(state, Msg::FilesPicked(vec![image("a.png", 10, 1)]));
    let view = state.view();
    assert_eq!(view.selection_count, 1);
    let stats = view.last_add_stats.unwrap();
    assert_eq!(stats.added, 0);
    assert_eq!(stats.duplicates, 1);

    // A differing mtime makes it a distinct file.
    let (state, _) = update(state, Msg::FilesPicked(vec![image("a.png", 10, 99)]));
    assert_eq!(state.view().selection_count, 2);
}

#[test]
fn non_image_files_are_dropped_at_intake() {
    init_logging();
    let state = AppState::new();

    let (state, _) = update(
        state,
        Msg::FilesPicked(vec![image("a.png", 10, 1), text_file("notes.txt")]),
    );

    let view = state.view();
    assert_eq!(view.selection_count, 1);
    let stats = view.last_add_stats.unwrap();
    assert_eq!(stats.added, 1);
    assert_eq!(stats.rejected, 1);
}

#[test]
fn remove_then_re_add_readmits_the_file() {
    init_logging();
    let state = AppState::new();
    let file = image("a.png", 10, 1);
    let (state, _) = update(state, Msg::FilesPicked(vec![file.clone()]));

    let (state, effects) = update(state, Msg::FileRemoved(file.key()));
    assert!(effects.is_empty());
    assert_eq!(state.view().selection_count, 0);
    assert!(!state.view().previews_visible);

    // No permanent denylist: the same file is accepted again.
    let (state, _) = update(state, Msg::FilesPicked(vec![file]));
    assert_eq!(state.view().selection_count, 1);
}

#[test]
fn remove_targets_a_single_entry() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(
        state,
        Msg::FilesPicked(vec![
            image("a.png", 10, 1),
            image("b.png", 20, 2),
            image("c.png", 30, 3),
        ]),
    );

    let (state, _) = update(state, Msg::FileRemoved(image("b.png", 20, 2).key()));
    let view = state.view();
    assert_eq!(view.selection_count, 2);
    assert_eq!(view.previews[0].name, "a.png");
    assert_eq!(view.previews[1].name, "c.png");
}

#[test]
fn clear_disables_action_and_re_add_enables_it() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::FilesPicked(vec![image("a.png", 10, 1)]));
    assert!(state.view().action_enabled);

    let (state, effects) = update(state, Msg::SelectionCleared);
    assert!(effects.is_empty());
    assert_eq!(state.view().selection_count, 0);
    assert!(!state.view().action_enabled);

    let (state, _) = update(state, Msg::FilesPicked(vec![image("a.png", 10, 1)]));
    assert!(state.view().action_enabled);
}
