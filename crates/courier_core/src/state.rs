use std::fmt;
use std::path::PathBuf;

use crate::format::{format_file_size, format_saved_percent};
use crate::view_model::{AppViewModel, PreviewRowView, ResultRowView, RunProgressView};

/// The active processing behavior; exactly one is selected at a time.
/// Switching modes never clears the selection or the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Optimize,
    Rename,
}

impl Mode {
    pub fn action_label(self) -> &'static str {
        match self {
            Mode::Optimize => "Optimize Images",
            Mode::Rename => "Rename Images",
        }
    }
}

/// A locally selected file, captured before upload.
///
/// `media_type` is derived from the file extension when the handle is built;
/// anything that does not start with `image/` is rejected at intake and again
/// by the optimize run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub last_modified_ms: u64,
    pub media_type: String,
}

impl FileHandle {
    pub fn key(&self) -> SelectionKey {
        SelectionKey {
            name: self.name.clone(),
            size: self.size,
            last_modified_ms: self.last_modified_ms,
        }
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Composite identity of a selection entry: two picks of the same file are
/// duplicates exactly when all three fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    pub name: String,
    pub size: u64,
    pub last_modified_ms: u64,
}

/// One processed image as reported by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub filename: String,
    pub original_size: u64,
    pub optimized_size: Option<u64>,
    pub compression_ratio: Option<f64>,
    pub download_url: String,
    pub session_path: Option<String>,
}

/// Intake summary for the most recent `FilesPicked` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddStats {
    pub added: usize,
    pub duplicates: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running {
        completed: usize,
        total: usize,
        current: Option<String>,
    },
}

/// Why a whole processing run failed. Per-file skips and per-file request
/// errors never reach this type; they are logged inside the run and the run
/// continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunFailure {
    /// Optimize run finished with zero successful results.
    NoFilesProcessed,
    /// Rename request came back with a non-success status.
    Http { status: u16, body: String },
    /// The request never produced a status (connect failure, timeout, ...).
    Transport(String),
    /// The response body was not the expected JSON array.
    InvalidResponse(String),
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunFailure::NoFilesProcessed => write!(f, "No images were successfully processed"),
            RunFailure::Http { status, body } => {
                write!(f, "Server responded with HTTP {status}: {body}")
            }
            RunFailure::Transport(message) => write!(f, "Request failed: {message}"),
            RunFailure::InvalidResponse(message) => write!(f, "Unexpected response: {message}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-facing message, rendered as a blocking notification by the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// The whole client state. Selection, results and mode are independent:
/// clearing one never touches the others, and a run replaces results only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    mode: Mode,
    selection: Vec<FileHandle>,
    results: Vec<ResultItem>,
    base_name: String,
    run: RunState,
    last_add_stats: Option<AddStats>,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> &[FileHandle] {
        &self.selection
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn is_running(&self) -> bool {
        matches!(self.run, RunState::Running { .. })
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.dirty = true;
        }
    }

    pub(crate) fn set_base_name(&mut self, base_name: String) {
        if self.base_name != base_name {
            self.base_name = base_name;
            self.dirty = true;
        }
    }

    /// Appends picked files, dropping non-images and entries whose
    /// `(name, size, last_modified)` key is already selected.
    pub(crate) fn add_files(&mut self, files: Vec<FileHandle>) -> AddStats {
        let mut stats = AddStats::default();
        for file in files {
            if !file.is_image() {
                stats.rejected += 1;
                continue;
            }
            let key = file.key();
            if self.selection.iter().any(|existing| existing.key() == key) {
                stats.duplicates += 1;
                continue;
            }
            self.selection.push(file);
            stats.added += 1;
        }
        self.last_add_stats = Some(stats);
        self.dirty = true;
        stats
    }

    /// Removes the single entry matching `key`. Returns whether one existed.
    pub(crate) fn remove_file(&mut self, key: &SelectionKey) -> bool {
        let before = self.selection.len();
        if let Some(index) = self.selection.iter().position(|file| file.key() == *key) {
            self.selection.remove(index);
        }
        let removed = self.selection.len() != before;
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub(crate) fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.dirty = true;
        }
    }

    pub(crate) fn begin_run(&mut self, total: usize) {
        self.run = RunState::Running {
            completed: 0,
            total,
            current: None,
        };
        self.notice = None;
        self.dirty = true;
    }

    pub(crate) fn apply_run_progress(&mut self, completed: usize, total: usize, current: String) {
        if self.is_running() {
            self.run = RunState::Running {
                completed,
                total,
                current: Some(current),
            };
            self.dirty = true;
        }
    }

    /// Run succeeded: results are replaced wholesale, the selection is left
    /// untouched and the progress indicator is cleared.
    pub(crate) fn finish_run_success(&mut self, items: Vec<ResultItem>) {
        self.results = items;
        self.run = RunState::Idle;
        self.notice = None;
        self.dirty = true;
    }

    /// Run failed: previously displayed results are preserved and the failure
    /// becomes a user-facing notice. The progress indicator is cleared here
    /// too, so cleanup holds on both exit paths.
    pub(crate) fn finish_run_failure(&mut self, failure: &RunFailure) {
        self.run = RunState::Idle;
        self.notice = Some(Notice::error(failure.to_string()));
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.dirty = true;
    }

    /// Returns and clears the dirty flag; the frontend re-renders when true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let previews = self
            .selection
            .iter()
            .map(|file| PreviewRowView {
                key: file.key(),
                name: file.name.clone(),
                size_label: format_file_size(file.size),
            })
            .collect::<Vec<_>>();

        let results = self
            .results
            .iter()
            .map(|item| result_row(self.mode, item))
            .collect::<Vec<_>>();

        let run = match &self.run {
            RunState::Idle => None,
            RunState::Running {
                completed,
                total,
                current,
            } => Some(RunProgressView {
                completed: *completed,
                total: *total,
                current: current.clone(),
            }),
        };

        AppViewModel {
            mode: self.mode,
            action_label: self.mode.action_label(),
            rename_options_visible: self.mode == Mode::Rename,
            base_name: self.base_name.clone(),
            selection_count: self.selection.len(),
            previews_visible: !self.selection.is_empty(),
            action_enabled: !self.selection.is_empty() && !self.is_running(),
            previews,
            run,
            results_visible: !self.results.is_empty(),
            results,
            last_add_stats: self.last_add_stats,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }
}

fn result_row(mode: Mode, item: &ResultItem) -> ResultRowView {
    // Size and savings columns only apply to optimized output; renaming does
    // not change byte size.
    let (optimized_label, saved_label) = match (mode, item.optimized_size) {
        (Mode::Optimize, Some(optimized)) => (
            Some(format_file_size(optimized)),
            Some(format_saved_percent(item.original_size, optimized)),
        ),
        _ => (None, None),
    };

    ResultRowView {
        filename: item.filename.clone(),
        original_label: format_file_size(item.original_size),
        optimized_label,
        saved_label,
        download_url: item.download_url.clone(),
    }
}
