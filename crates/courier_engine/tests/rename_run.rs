use std::sync::Once;

use courier_engine::{
    inspect_file, run_rename, ClientSettings, ReqwestApiClient, RunError, UploadFile,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn client_for(server: &MockServer) -> ReqwestApiClient {
    ReqwestApiClient::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
}

fn write_image(dir: &std::path::Path, name: &str, content: &[u8]) -> UploadFile {
    let file_path = dir.join(name);
    std::fs::write(&file_path, content).unwrap();
    inspect_file(&file_path).unwrap()
}

fn renamed_body() -> serde_json::Value {
    serde_json::json!([
        {
            "filename": "vacation-1.jpg",
            "original_size": 4,
            "download_url": "/renamed/vacation-1.jpg",
            "session_path": "abc123",
        },
        {
            "filename": "vacation-2.jpg",
            "original_size": 4,
            "download_url": "/renamed/vacation-2.jpg",
            "session_path": "abc123",
        },
        {
            "filename": "vacation-3.jpg",
            "original_size": 4,
            "download_url": "/renamed/vacation-3.jpg",
            "session_path": "abc123",
        }
    ])
}

#[tokio::test]
async fn rename_posts_one_batch_request() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rename"))
        .and(body_string_contains("vacation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(renamed_body()))
        .expect(1)
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let files = vec![
        write_image(temp.path(), "one.jpg", b"1111"),
        write_image(temp.path(), "two.jpg", b"2222"),
        write_image(temp.path(), "three.jpg", b"3333"),
    ];

    let client = client_for(&server);
    let results = run_rename(&client, &files, "vacation").await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].session_path.as_deref(), Some("abc123"));
    // Optimize-only fields are simply absent for a rename run.
    assert_eq!(results[0].optimized_size, None);
    assert_eq!(results[0].compression_ratio, None);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "rename is a single batch request");
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert_eq!(body.matches("name=\"baseName\"").count(), 1);
    assert_eq!(body.matches("name=\"files\"").count(), 3);
    assert!(body.contains("filename=\"one.jpg\""));
    assert!(body.contains("filename=\"two.jpg\""));
    assert!(body.contains("filename=\"three.jpg\""));
}

#[tokio::test]
async fn rename_failure_embeds_status_and_body_text() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rename"))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid base name"))
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let files = vec![write_image(temp.path(), "one.jpg", b"1111")];

    let client = client_for(&server);
    let outcome = run_rename(&client, &files, "vacation").await;

    assert_eq!(
        outcome,
        Err(RunError::HttpStatus {
            status: 422,
            body: "invalid base name".to_string(),
        })
    );
    let message = outcome.unwrap_err().to_string();
    assert!(message.contains("422"));
    assert!(message.contains("invalid base name"));
}

#[tokio::test]
async fn unreadable_file_fails_the_batch_up_front() {
    init_logging();
    let server = MockServer::start().await;

    let files = vec![UploadFile {
        path: "/nowhere/missing.jpg".into(),
        name: "missing.jpg".to_string(),
        size: 4,
        last_modified_ms: 0,
        media_type: "image/jpeg".to_string(),
    }];

    let client = client_for(&server);
    let outcome = run_rename(&client, &files, "vacation").await;

    assert!(matches!(outcome, Err(RunError::FileRead { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}
