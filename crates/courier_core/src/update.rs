use crate::effect::{DownloadRequest, Effect, ZipQuery};
use crate::state::{AppState, Mode, Notice, ResultItem};
use crate::Msg;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesPicked(files) => {
            if files.is_empty() {
                return (state, Vec::new());
            }
            state.add_files(files);
            Vec::new()
        }
        Msg::FileRemoved(key) => {
            state.remove_file(&key);
            Vec::new()
        }
        Msg::SelectionCleared => {
            state.clear_selection();
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::BaseNameChanged(base_name) => {
            state.set_base_name(base_name);
            Vec::new()
        }
        Msg::ProcessClicked => {
            // The action control is disabled for an empty selection, and a
            // run in flight cannot be restarted or cancelled.
            if state.selection().is_empty() || state.is_running() {
                return (state, Vec::new());
            }
            match state.mode() {
                Mode::Optimize => {
                    let files = state.selection().to_vec();
                    state.begin_run(files.len());
                    vec![Effect::StartOptimize { files }]
                }
                Mode::Rename => {
                    let base_name = state.base_name().trim().to_string();
                    if base_name.is_empty() {
                        state.set_notice(Notice::error("Enter a base name before renaming"));
                        return (state, Vec::new());
                    }
                    let files = state.selection().to_vec();
                    state.begin_run(files.len());
                    vec![Effect::StartRename { files, base_name }]
                }
            }
        }
        Msg::RunProgress {
            completed,
            total,
            filename,
        } => {
            state.apply_run_progress(completed, total, filename);
            Vec::new()
        }
        Msg::RunFinished { result } => {
            match result {
                Ok(items) => state.finish_run_success(items),
                Err(failure) => state.finish_run_failure(&failure),
            }
            Vec::new()
        }
        Msg::DownloadAllClicked => {
            if state.results().is_empty() {
                return (state, Vec::new());
            }
            let requests = state
                .results()
                .iter()
                .map(|item| DownloadRequest {
                    url: item.download_url.clone(),
                    filename: item.filename.clone(),
                })
                .collect();
            vec![Effect::DownloadSequential { requests }]
        }
        Msg::DownloadZipClicked => {
            if state.results().is_empty() {
                state.set_notice(Notice::error("No results available to download"));
                return (state, Vec::new());
            }
            match zip_query(state.results()) {
                Some(query) => vec![Effect::DownloadZip { query }],
                None => {
                    state.set_notice(Notice::error("Could not determine which files to bundle"));
                    Vec::new()
                }
            }
        }
        Msg::DownloadsFinished { result } => {
            match result {
                Ok(saved) => {
                    state.set_notice(Notice::info(format!("Saved {} file(s)", saved.len())));
                }
                Err(message) => state.set_notice(Notice::error(message)),
            }
            Vec::new()
        }
        Msg::ZipFinished { result } => {
            match result {
                Ok(path) => {
                    state.set_notice(Notice::info(format!("Saved {}", path.display())));
                }
                Err(message) => state.set_notice(Notice::error(message)),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Picks the ZIP request form: a session identifier shared by every result,
/// otherwise the comma-joined filename fallback.
fn zip_query(results: &[ResultItem]) -> Option<ZipQuery> {
    if let Some(session) = results.first().and_then(|item| item.session_path.as_deref()) {
        if !session.is_empty()
            && results
                .iter()
                .all(|item| item.session_path.as_deref() == Some(session))
        {
            return Some(ZipQuery::Session(session.to_string()));
        }
    }

    let names: Vec<String> = results
        .iter()
        .map(|item| item.filename.clone())
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(ZipQuery::Files(names))
    }
}
