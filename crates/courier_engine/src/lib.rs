//! Courier engine: HTTP effect execution for the upload workflow.
mod api;
mod download;
mod engine;
mod filename;
mod local;
mod persist;
mod run;
mod types;

pub use api::{ApiClient, ClientSettings, ReqwestApiClient};
pub use download::{download_all, download_zip, DownloadRequest, DOWNLOAD_STAGGER, ZIP_ARCHIVE_NAME};
pub use engine::{EngineConfig, EngineHandle};
pub use filename::{disambiguated_filename, download_filename};
pub use local::{inspect_file, media_type_for_extension, InspectError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use run::{run_optimize, run_rename, MAX_UPLOAD_BYTES, PACING_DELAY};
pub use types::{
    ChannelProgressSink, DownloadError, EngineEvent, ProgressSink, ResultItem, RunError,
    UploadFile, ZipQuery,
};
