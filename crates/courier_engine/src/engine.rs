use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;

use crate::api::{ClientSettings, ReqwestApiClient};
use crate::download::{download_all, download_zip, DownloadRequest};
use crate::persist::AtomicFileWriter;
use crate::run::{run_optimize, run_rename};
use crate::types::{ChannelProgressSink, EngineEvent, UploadFile, ZipQuery};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub settings: ClientSettings,
    pub output_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            settings: ClientSettings::default(),
            output_dir,
        }
    }
}

enum EngineCommand {
    RunOptimize {
        files: Vec<UploadFile>,
    },
    RunRename {
        files: Vec<UploadFile>,
        base_name: String,
    },
    DownloadResults {
        requests: Vec<DownloadRequest>,
    },
    DownloadZip {
        query: ZipQuery,
    },
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = ReqwestApiClient::new(config.settings);
        let writer = AtomicFileWriter::new(config.output_dir);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            // Commands run to completion one at a time: the protocol never
            // has two requests in flight.
            while let Ok(command) = cmd_rx.recv() {
                runtime.block_on(handle_command(&client, &writer, command, event_tx.clone()));
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn run_optimize(&self, files: Vec<UploadFile>) {
        let _ = self.cmd_tx.send(EngineCommand::RunOptimize { files });
    }

    pub fn run_rename(&self, files: Vec<UploadFile>, base_name: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::RunRename {
            files,
            base_name: base_name.into(),
        });
    }

    pub fn download_results(&self, requests: Vec<DownloadRequest>) {
        let _ = self.cmd_tx.send(EngineCommand::DownloadResults { requests });
    }

    pub fn download_zip(&self, query: ZipQuery) {
        let _ = self.cmd_tx.send(EngineCommand::DownloadZip { query });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|rx| rx.try_recv().ok())
    }
}

async fn handle_command(
    client: &ReqwestApiClient,
    writer: &AtomicFileWriter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::RunOptimize { files } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = run_optimize(client, &files, &sink).await;
            let _ = event_tx.send(EngineEvent::RunCompleted { result });
        }
        EngineCommand::RunRename { files, base_name } => {
            let result = run_rename(client, &files, &base_name).await;
            let _ = event_tx.send(EngineEvent::RunCompleted { result });
        }
        EngineCommand::DownloadResults { requests } => {
            let result = download_all(client, &requests, writer).await;
            let _ = event_tx.send(EngineEvent::DownloadsCompleted { result });
        }
        EngineCommand::DownloadZip { query } => {
            let result = download_zip(client, &query, writer).await;
            let _ = event_tx.send(EngineEvent::ZipCompleted { result });
        }
    }
}
