use crate::state::{AddStats, Mode, Notice, SelectionKey};

/// Everything a frontend needs to render, derived from `AppState::view`.
/// No rendering technology leaks into this crate; rows are plain data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub mode: Mode,
    pub action_label: &'static str,
    pub rename_options_visible: bool,
    pub base_name: String,
    pub selection_count: usize,
    pub previews_visible: bool,
    pub action_enabled: bool,
    pub previews: Vec<PreviewRowView>,
    pub run: Option<RunProgressView>,
    pub results_visible: bool,
    pub results: Vec<ResultRowView>,
    pub last_add_stats: Option<AddStats>,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

/// One selected file awaiting processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRowView {
    pub key: SelectionKey,
    pub name: String,
    pub size_label: String,
}

/// Transient run indicator: "Image {completed}/{total}".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunProgressView {
    pub completed: usize,
    pub total: usize,
    pub current: Option<String>,
}

/// One processed result. Optimized size and savings are only present in
/// optimize mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub filename: String,
    pub original_label: String,
    pub optimized_label: Option<String>,
    pub saved_label: Option<String>,
    pub download_url: String,
}
