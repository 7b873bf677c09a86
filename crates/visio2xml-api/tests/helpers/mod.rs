//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p visio2xml-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

use visio2xml_api::setup;
use visio2xml_api::state::AppState;
use visio2xml_convert::{DocumentParser, VisioParser, VisioXmlRenderer};
use visio2xml_core::{Config, InMemoryRegistry};
use visio2xml_storage::LocalStorage;

/// Test application: server plus owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.temp_dir.path().join("uploads")
    }

    pub fn outputs_dir(&self) -> PathBuf {
        self.temp_dir.path().join("outputs")
    }
}

fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        // 1MB ceiling keeps the oversize-rejection test cheap
        max_file_size_bytes: 1024 * 1024,
        upload_dir: temp_dir
            .path()
            .join("uploads")
            .to_string_lossy()
            .into_owned(),
        output_dir: temp_dir
            .path()
            .join("outputs")
            .to_string_lossy()
            .into_owned(),
        conversion_max_workers: 2,
        conversion_queue_capacity: 16,
        ..Config::default()
    }
}

/// Setup test app with isolated temp-dir storage roots.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_parser(Arc::new(VisioParser::new())).await
}

/// Same, but with an injected parser (e.g. one that always fails).
pub async fn setup_test_app_with_parser(parser: Arc<dyn DocumentParser>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(&temp_dir);

    let registry = Arc::new(InMemoryRegistry::new());
    let uploads = Arc::new(
        LocalStorage::new(config.upload_dir.clone())
            .await
            .expect("Failed to create uploads storage"),
    );
    let outputs = Arc::new(
        LocalStorage::new(config.output_dir.clone())
            .await
            .expect("Failed to create outputs storage"),
    );

    let (state, router) = setup::build_app(
        config,
        registry,
        uploads,
        outputs,
        parser,
        Arc::new(VisioXmlRenderer::new()),
    )
    .expect("Failed to build app");

    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        state,
        temp_dir,
    }
}

/// Upload `data` under `filename` and return the new file id.
pub async fn upload_file(client: &TestServer, filename: &str, data: Vec<u8>) -> Uuid {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(filename)
        .mime_type("application/octet-stream");
    let multipart = MultipartForm::new().add_part("file", part);

    let response = client.post("/api/upload").multipart(multipart).await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    Uuid::parse_str(
        body.get("file_id")
            .and_then(|v| v.as_str())
            .expect("Expected 'file_id' in upload response"),
    )
    .expect("Invalid UUID in upload response")
}

/// Poll the status endpoint until the conversion reaches a terminal state.
pub async fn wait_for_terminal_status(client: &TestServer, id: Uuid) -> serde_json::Value {
    for _ in 0..200 {
        let response = client.get(&format!("/api/convert/{id}/status")).await;
        assert_eq!(response.status_code(), 200);

        let body: serde_json::Value = response.json();
        match body["status"].as_str() {
            Some("completed") | Some("failed") => return body,
            _ => tokio::time::sleep(Duration::from_millis(10)).await,
        }
    }
    panic!("conversion for {id} never reached a terminal state");
}
