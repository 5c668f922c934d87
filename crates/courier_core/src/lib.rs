//! Courier core: pure state machine and view-model helpers.
mod effect;
mod format;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{DownloadRequest, Effect, ZipQuery};
pub use format::{format_file_size, format_saved_percent, saved_percent};
pub use msg::Msg;
pub use state::{
    AddStats, AppState, FileHandle, Mode, Notice, NoticeLevel, ResultItem, RunFailure, RunState,
    SelectionKey,
};
pub use update::update;
pub use view_model::{AppViewModel, PreviewRowView, ResultRowView, RunProgressView};
