use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use client_logging::{client_error, client_info};

use crate::api::ApiClient;
use crate::filename::{disambiguated_filename, download_filename};
use crate::persist::AtomicFileWriter;
use crate::types::{DownloadError, ZipQuery};

/// Delay between consecutive individual downloads, mirroring the staggering
/// a browser needs to avoid download throttling.
pub const DOWNLOAD_STAGGER: Duration = Duration::from_millis(300);

/// Local name for the ZIP bundle.
pub const ZIP_ARCHIVE_NAME: &str = "optimized-images.zip";

/// One individual download: the result URL plus the suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
}

/// Fetches every result in order and saves the bodies under the writer's
/// directory. A failing item is logged and skipped; the remaining downloads
/// proceed. Saving to disk fails the whole batch, since later items would
/// fail the same way.
pub async fn download_all(
    client: &dyn ApiClient,
    requests: &[DownloadRequest],
    writer: &AtomicFileWriter,
) -> Result<Vec<PathBuf>, DownloadError> {
    let mut saved = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();

    for (index, request) in requests.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(DOWNLOAD_STAGGER).await;
        }

        let body = match client.fetch(&request.url).await {
            Ok(body) => body,
            Err(err) => {
                client_error!("Download failed for \"{}\": {}", request.filename, err);
                continue;
            }
        };

        let mut name = download_filename(&request.filename, &request.url);
        if !taken.insert(name.clone()) {
            name = disambiguated_filename(&request.filename, &request.url);
            taken.insert(name.clone());
        }

        let path = writer
            .write(&name, &body)
            .map_err(|err| DownloadError::Persist {
                filename: name.clone(),
                message: err.to_string(),
            })?;
        client_info!("Saved \"{}\" ({} bytes)", name, body.len());
        saved.push(path);
    }

    Ok(saved)
}

/// Fetches the ZIP bundle for `query` and saves it as
/// [`ZIP_ARCHIVE_NAME`] under the writer's directory.
pub async fn download_zip(
    client: &dyn ApiClient,
    query: &ZipQuery,
    writer: &AtomicFileWriter,
) -> Result<PathBuf, DownloadError> {
    let body = client.fetch_zip(query).await?;
    writer
        .write(ZIP_ARCHIVE_NAME, &body)
        .map_err(|err| DownloadError::Persist {
            filename: ZIP_ARCHIVE_NAME.to_string(),
            message: err.to_string(),
        })
}
