use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

use thiserror::Error;

use crate::types::UploadFile;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("not a regular file: {0}")]
    NotAFile(String),
    #[error("could not inspect {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Media type for a filename extension, covering the formats the service
/// accepts. Anything else maps to an opaque type the optimize run skips.
pub fn media_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Builds an [`UploadFile`] from a local path: size and mtime come from
/// filesystem metadata, the media type from the extension.
pub fn inspect_file(path: &Path) -> Result<UploadFile, InspectError> {
    let metadata = fs_metadata(path)?;
    if !metadata.is_file() {
        return Err(InspectError::NotAFile(path.display().to_string()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_string());

    let last_modified_ms = metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    Ok(UploadFile {
        path: path.to_path_buf(),
        name,
        size: metadata.len(),
        last_modified_ms,
        media_type: media_type_for_extension(extension).to_string(),
    })
}

fn fs_metadata(path: &Path) -> Result<std::fs::Metadata, InspectError> {
    std::fs::metadata(path).map_err(|source| InspectError::Io {
        path: path.display().to_string(),
        source,
    })
}
