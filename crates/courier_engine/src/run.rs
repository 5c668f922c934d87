use std::time::Duration;

use client_logging::{client_error, client_info, client_warn};

use crate::api::ApiClient;
use crate::types::{EngineEvent, ProgressSink, ResultItem, RunError, UploadFile};

/// Upload ceiling per file; larger files are skipped, not rejected as errors.
pub const MAX_UPLOAD_BYTES: u64 = 15 * 1024 * 1024;

/// Delay between consecutive optimize uploads. The service cannot take
/// back-to-back multipart posts reliably, so the loop paces itself.
pub const PACING_DELAY: Duration = Duration::from_millis(200);

/// Sequential per-file optimize protocol.
///
/// Each file is posted in its own request; skips and per-file failures are
/// logged and never abort the remaining files. The run as a whole fails only
/// when nothing succeeded.
pub async fn run_optimize(
    client: &dyn ApiClient,
    files: &[UploadFile],
    sink: &dyn ProgressSink,
) -> Result<Vec<ResultItem>, RunError> {
    let total = files.len();
    let mut collected = Vec::new();

    for (index, file) in files.iter().enumerate() {
        sink.emit(EngineEvent::RunProgress {
            completed: index + 1,
            total,
            filename: file.name.clone(),
        });

        if !file.media_type.starts_with("image/") {
            client_warn!(
                "Skipping \"{}\" - not an image ({})",
                file.name,
                file.media_type
            );
            continue;
        }

        if file.size > MAX_UPLOAD_BYTES {
            client_warn!(
                "Skipping \"{}\" - too large ({} > {})",
                file.name,
                human_size(file.size),
                human_size(MAX_UPLOAD_BYTES)
            );
            continue;
        }

        match client.optimize(file).await {
            Ok(items) => {
                client_info!("Optimized \"{}\": {} result(s)", file.name, items.len());
                collected.extend(items);
            }
            Err(err) => {
                client_error!("Error optimizing \"{}\": {}", file.name, err);
            }
        }

        if index + 1 < total {
            tokio::time::sleep(PACING_DELAY).await;
        }
    }

    if collected.is_empty() {
        return Err(RunError::NoFilesProcessed);
    }
    Ok(collected)
}

/// Single-batch rename protocol: all files plus the base name in one request.
/// Atomic from the client's perspective; any non-success status fails the run
/// with the response body embedded.
pub async fn run_rename(
    client: &dyn ApiClient,
    files: &[UploadFile],
    base_name: &str,
) -> Result<Vec<ResultItem>, RunError> {
    client_info!(
        "Renaming {} file(s) with base name \"{}\"",
        files.len(),
        base_name
    );
    client.rename(files, base_name).await
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{rendered} {}", UNITS[unit])
}
