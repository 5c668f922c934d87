use std::path::PathBuf;

use crate::state::{FileHandle, Mode, ResultItem, RunFailure, SelectionKey};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked or dropped files; handles are already inspected.
    FilesPicked(Vec<FileHandle>),
    /// User clicked the remove control of one preview entry.
    FileRemoved(SelectionKey),
    /// User clicked "clear all".
    SelectionCleared,
    /// User switched the Optimize/Rename tab.
    ModeSelected(Mode),
    /// User edited the rename base-name input.
    BaseNameChanged(String),
    /// User clicked the primary action button.
    ProcessClicked,
    /// Engine progress for the run in flight, one event per attempted file.
    RunProgress {
        completed: usize,
        total: usize,
        filename: String,
    },
    /// Engine completion for the run in flight.
    RunFinished {
        result: Result<Vec<ResultItem>, RunFailure>,
    },
    /// User clicked "download all" (sequential individual downloads).
    DownloadAllClicked,
    /// User clicked "download as ZIP".
    DownloadZipClicked,
    /// Engine finished the sequential downloads; `Ok` lists saved paths.
    DownloadsFinished {
        result: Result<Vec<PathBuf>, String>,
    },
    /// Engine finished the ZIP bundle download.
    ZipFinished { result: Result<PathBuf, String> },
    /// Fallback for placeholder wiring.
    NoOp,
}
