use crate::state::FileHandle;

/// Side effects requested by `update`, executed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run the sequential per-file optimize protocol over `files`.
    StartOptimize { files: Vec<FileHandle> },
    /// Run the single-batch rename protocol over `files`.
    StartRename {
        files: Vec<FileHandle>,
        base_name: String,
    },
    /// Fetch every result in display order, staggered to avoid throttling.
    DownloadSequential { requests: Vec<DownloadRequest> },
    /// Fetch one ZIP bundle for the current results.
    DownloadZip { query: ZipQuery },
}

/// One individual download: the service URL plus the suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
}

/// How to key the ZIP bundle request. A shared session identifier is
/// preferred; a comma-joined filename list is the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZipQuery {
    Session(String),
    Files(Vec<String>),
}
