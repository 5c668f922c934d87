use std::path::PathBuf;
use std::sync::Once;

use courier_core::{
    update, AppState, Effect, FileHandle, Mode, Msg, NoticeLevel, ResultItem, RunFailure,
};

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
        media_type: "image/jpeg".to_string(),
    }
}

fn result(filename: &str, original: u64, optimized: u64) -> ResultItem {
    ResultItem {
        filename: filename.to_string(),
        original_size: original,
        optimized_size: Some(optimized),
        compression_ratio: None,
        download_url: format!("/optimized/{filename}"),
        session_path: None,
    }
}

fn with_selection(names: &[&str]) -> AppState {
    let files = names
        .iter()
        .enumerate()
        .map(|(index, name)| image(name, 100 + index as u64, index as u64))
        .collect();
    let (state, _) = update(AppState::new(), Msg::FilesPicked(files));
    state
}

#[test]
fn update_is_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn process_with_empty_selection_is_ignored() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ProcessClicked);
    assert!(effects.is_empty());
    assert!(!state.is_running());
}

#[test]
fn process_dispatches_optimize_run() {
    init_logging();
    let state = with_selection(&["a.jpg", "b.jpg"]);

    let (state, effects) = update(state, Msg::ProcessClicked);

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::StartOptimize { files } => {
            assert_eq!(files.len(), 2);
            assert_eq!(files[0].name, "a.jpg");
        }
        other => panic!("unexpected effect: {other:?}"),
    }
    assert!(state.is_running());
    assert!(!state.view().action_enabled);

    // A second click while running dispatches nothing.
    let (state, effects) = update(state, Msg::ProcessClicked);
    assert!(effects.is_empty());
    assert!(state.is_running());
}

#[test]
fn rename_requires_a_base_name() {
    init_logging();
    let state = with_selection(&["a.jpg"]);
    let (state, _) = update(state, Msg::ModeSelected(Mode::Rename));

    let (state, effects) = update(state, Msg::ProcessClicked);
    assert!(effects.is_empty());
    assert!(!state.is_running());
    let notice = state.view().notice.expect("notice expected");
    assert_eq!(notice.level, NoticeLevel::Error);

    let (state, _) = update(state, Msg::BaseNameChanged("  vacation  ".to_string()));
    let (state, effects) = update(state, Msg::ProcessClicked);
    assert_eq!(
        effects,
        vec![Effect::StartRename {
            files: state.selection().to_vec(),
            base_name: "vacation".to_string(),
        }]
    );
    assert!(state.is_running());
}

#[test]
fn run_progress_updates_the_indicator() {
    init_logging();
    let state = with_selection(&["a.jpg", "b.jpg", "c.jpg"]);
    let (state, _) = update(state, Msg::ProcessClicked);

    let (mut state, effects) = update(
        state,
        Msg::RunProgress {
            completed: 2,
            total: 3,
            filename: "b.jpg".to_string(),
        },
    );
    assert!(effects.is_empty());

    let run = state.view().run.expect("run indicator expected");
    assert_eq!(run.completed, 2);
    assert_eq!(run.total, 3);
    assert_eq!(run.current.as_deref(), Some("b.jpg"));
    assert!(state.consume_dirty());
}

#[test]
fn successful_run_replaces_results_and_keeps_selection() {
    init_logging();
    let state = with_selection(&["a.jpg"]);
    let (state, _) = update(state, Msg::ProcessClicked);

    let (state, _) = update(
        state,
        Msg::RunFinished {
            result: Ok(vec![result("a-optimized.webp", 2048, 1024)]),
        },
    );

    let view = state.view();
    assert!(!state.is_running());
    assert!(view.run.is_none());
    assert!(view.results_visible);
    assert_eq!(view.results.len(), 1);
    assert_eq!(view.results[0].filename, "a-optimized.webp");
    assert_eq!(view.results[0].original_label, "2 KB");
    assert_eq!(view.results[0].optimized_label.as_deref(), Some("1 KB"));
    assert_eq!(view.results[0].saved_label.as_deref(), Some("50.0%"));
    // Selection is untouched by a run.
    assert_eq!(view.selection_count, 1);
}

#[test]
fn failed_run_preserves_previous_results() {
    init_logging();
    let state = with_selection(&["a.jpg"]);
    let (state, _) = update(state, Msg::ProcessClicked);
    let (state, _) = update(
        state,
        Msg::RunFinished {
            result: Ok(vec![result("a-optimized.webp", 2048, 1024)]),
        },
    );

    // Second run fails outright.
    let (state, _) = update(state, Msg::ProcessClicked);
    let (state, _) = update(
        state,
        Msg::RunFinished {
            result: Err(RunFailure::NoFilesProcessed),
        },
    );

    let view = state.view();
    assert!(view.run.is_none(), "indicator cleared on failure too");
    assert_eq!(view.results.len(), 1, "previous results retained");
    let notice = view.notice.expect("failure notice expected");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("No images were successfully processed"));
}

#[test]
fn http_failure_message_embeds_status_and_body() {
    init_logging();
    let failure = RunFailure::Http {
        status: 422,
        body: "bad base name".to_string(),
    };
    let message = failure.to_string();
    assert!(message.contains("422"));
    assert!(message.contains("bad base name"));
}

#[test]
fn mode_switch_preserves_selection_and_results() {
    init_logging();
    let state = with_selection(&["a.jpg"]);
    let (state, _) = update(state, Msg::ProcessClicked);
    let (state, _) = update(
        state,
        Msg::RunFinished {
            result: Ok(vec![result("a-optimized.webp", 2048, 1024)]),
        },
    );

    let (state, effects) = update(state, Msg::ModeSelected(Mode::Rename));
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.mode, Mode::Rename);
    assert_eq!(view.action_label, "Rename Images");
    assert!(view.rename_options_visible);
    assert_eq!(view.selection_count, 1);
    assert_eq!(view.results.len(), 1);
    // Size columns disappear in rename mode.
    assert!(view.results[0].optimized_label.is_none());
    assert!(view.results[0].saved_label.is_none());
}
