use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use client_logging::client_info;
use courier_core::{Effect, FileHandle, Msg, ResultItem, RunFailure, ZipQuery};
use courier_engine::{DownloadRequest, EngineConfig, EngineEvent, EngineHandle, RunError, UploadFile};

/// Bridges the pure core to the engine: executes effects and feeds engine
/// events back into the update loop as messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, msg_tx: mpsc::Sender<Msg>) -> Self {
        let engine = Arc::new(EngineHandle::new(config));
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartOptimize { files } => {
                    client_info!("StartOptimize files={}", files.len());
                    self.engine
                        .run_optimize(files.into_iter().map(to_upload).collect());
                }
                Effect::StartRename { files, base_name } => {
                    client_info!(
                        "StartRename files={} base_name={}",
                        files.len(),
                        base_name
                    );
                    self.engine
                        .run_rename(files.into_iter().map(to_upload).collect(), base_name);
                }
                Effect::DownloadSequential { requests } => {
                    client_info!("DownloadSequential requests={}", requests.len());
                    self.engine.download_results(
                        requests
                            .into_iter()
                            .map(|request| DownloadRequest {
                                url: request.url,
                                filename: request.filename,
                            })
                            .collect(),
                    );
                }
                Effect::DownloadZip { query } => {
                    client_info!("DownloadZip");
                    self.engine.download_zip(map_zip_query(query));
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let msg = match event {
                    EngineEvent::RunProgress {
                        completed,
                        total,
                        filename,
                    } => Msg::RunProgress {
                        completed,
                        total,
                        filename,
                    },
                    EngineEvent::RunCompleted { result } => Msg::RunFinished {
                        result: result
                            .map(|items| items.into_iter().map(from_engine_item).collect())
                            .map_err(map_run_error),
                    },
                    EngineEvent::DownloadsCompleted { result } => Msg::DownloadsFinished {
                        result: result.map_err(|err| err.to_string()),
                    },
                    EngineEvent::ZipCompleted { result } => Msg::ZipFinished {
                        result: result.map_err(|err| err.to_string()),
                    },
                };
                if msg_tx.send(msg).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn to_upload(file: FileHandle) -> UploadFile {
    UploadFile {
        path: file.path,
        name: file.name,
        size: file.size,
        last_modified_ms: file.last_modified_ms,
        media_type: file.media_type,
    }
}

pub fn from_upload(file: UploadFile) -> FileHandle {
    FileHandle {
        path: file.path,
        name: file.name,
        size: file.size,
        last_modified_ms: file.last_modified_ms,
        media_type: file.media_type,
    }
}

fn from_engine_item(item: courier_engine::ResultItem) -> ResultItem {
    ResultItem {
        filename: item.filename,
        original_size: item.original_size,
        optimized_size: item.optimized_size,
        compression_ratio: item.compression_ratio,
        download_url: item.download_url,
        session_path: item.session_path,
    }
}

fn map_run_error(err: RunError) -> RunFailure {
    match err {
        RunError::NoFilesProcessed => RunFailure::NoFilesProcessed,
        RunError::HttpStatus { status, body } => RunFailure::Http { status, body },
        RunError::Status(status) => RunFailure::Http {
            status,
            body: String::new(),
        },
        RunError::FileRead { name, message } => {
            RunFailure::Transport(format!("could not read {name}: {message}"))
        }
        RunError::Network(message) => RunFailure::Transport(message),
        RunError::InvalidResponse(message) => RunFailure::InvalidResponse(message),
    }
}

fn map_zip_query(query: ZipQuery) -> courier_engine::ZipQuery {
    match query {
        ZipQuery::Session(session) => courier_engine::ZipQuery::Session(session),
        ZipQuery::Files(names) => courier_engine::ZipQuery::Files(names),
    }
}
