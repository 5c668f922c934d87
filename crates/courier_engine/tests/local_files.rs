use courier_engine::{inspect_file, media_type_for_extension, InspectError};
use pretty_assertions::assert_eq;

#[test]
fn inspect_reads_name_size_and_media_type() {
    let temp = tempfile::TempDir::new().unwrap();
    let file_path = temp.path().join("photo.PNG");
    std::fs::write(&file_path, b"not really a png").unwrap();

    let file = inspect_file(&file_path).unwrap();

    assert_eq!(file.name, "photo.PNG");
    assert_eq!(file.size, 16);
    assert_eq!(file.media_type, "image/png");
    assert!(file.last_modified_ms > 0);
    assert_eq!(file.path, file_path);
}

#[test]
fn unknown_extensions_are_not_images() {
    let temp = tempfile::TempDir::new().unwrap();
    let file_path = temp.path().join("notes.txt");
    std::fs::write(&file_path, b"hello").unwrap();

    let file = inspect_file(&file_path).unwrap();
    assert_eq!(file.media_type, "application/octet-stream");
}

#[test]
fn directories_are_rejected() {
    let temp = tempfile::TempDir::new().unwrap();
    let outcome = inspect_file(temp.path());
    assert!(matches!(outcome, Err(InspectError::NotAFile(_))));
}

#[test]
fn missing_files_surface_the_io_error() {
    let outcome = inspect_file(std::path::Path::new("/nowhere/missing.png"));
    assert!(matches!(outcome, Err(InspectError::Io { .. })));
}

#[test]
fn extension_lookup_matches_the_service_formats() {
    assert_eq!(media_type_for_extension("jpg"), "image/jpeg");
    assert_eq!(media_type_for_extension("JPEG"), "image/jpeg");
    assert_eq!(media_type_for_extension("webp"), "image/webp");
    assert_eq!(media_type_for_extension("tiff"), "image/tiff");
    assert_eq!(media_type_for_extension("exe"), "application/octet-stream");
}
