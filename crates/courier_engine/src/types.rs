use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A local file staged for upload. Built by [`crate::inspect_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub last_modified_ms: u64,
    pub media_type: String,
}

/// One processed image as returned by the service.
///
/// Wire shape of the JSON array elements both endpoints respond with.
/// `optimized_size` and `compression_ratio` are absent for rename runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub filename: String,
    pub original_size: u64,
    #[serde(default)]
    pub optimized_size: Option<u64>,
    #[serde(default)]
    pub compression_ratio: Option<f64>,
    pub download_url: String,
    #[serde(default)]
    pub session_path: Option<String>,
}

/// How to key the ZIP bundle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZipQuery {
    Session(String),
    Files(Vec<String>),
}

/// Events the engine reports back to the frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// One attempted file in the optimize loop: `completed` of `total`.
    RunProgress {
        completed: usize,
        total: usize,
        filename: String,
    },
    /// The processing run concluded, successfully or not.
    RunCompleted {
        result: Result<Vec<ResultItem>, RunError>,
    },
    /// Sequential individual downloads concluded; `saved` lists local paths.
    DownloadsCompleted {
        result: Result<Vec<PathBuf>, DownloadError>,
    },
    /// The ZIP bundle download concluded.
    ZipCompleted {
        result: Result<PathBuf, DownloadError>,
    },
}

/// Why a processing run failed as a whole, or why one file of the optimize
/// loop failed (those are logged by the loop and never abort it).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("No images were successfully processed")]
    NoFilesProcessed,
    /// Rename failure: the response body text is part of the contract.
    #[error("server responded with HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    /// Optimize per-file failure: only the status matters, the body is ignored.
    #[error("HTTP {0}")]
    Status(u16),
    #[error("could not read {name}: {message}")]
    FileRead { name: String, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Why a download failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("could not save {filename}: {message}")]
    Persist { filename: String, message: String },
}

/// Receives engine events as they happen; implemented over a channel by the
/// frontends and over a `Vec` by tests.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}
