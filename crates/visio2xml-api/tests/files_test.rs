//! Registry listing, deletion, and service probe integration tests.
//!
//! Run with: `cargo test -p visio2xml-api --test files_test`

mod helpers;

use helpers::{fixtures, setup_test_app, upload_file, wait_for_terminal_status};
use uuid::Uuid;

fn dir_entry_count(path: &std::path::Path) -> usize {
    std::fs::read_dir(path).map(|dir| dir.count()).unwrap_or(0)
}

#[tokio::test]
async fn test_list_files_starts_empty() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get("/api/files").await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 0);
    assert_eq!(body["files"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_removes_entry_and_backing_files() {
    let app = setup_test_app().await;
    let client = app.client();

    let id = upload_file(client, "diagram.vsdx", fixtures::build_vsdx(&[("Flow", 1)])).await;
    client.post(&format!("/api/convert/{id}")).await;
    wait_for_terminal_status(client, id).await;

    assert_eq!(dir_entry_count(&app.uploads_dir()), 1);
    assert_eq!(dir_entry_count(&app.outputs_dir()), 1);

    let response = client.delete(&format!("/api/files/{id}")).await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "File deleted successfully");

    // gone from the registry...
    let list: serde_json::Value = client.get("/api/files").await.json();
    assert_eq!(list["total"], 0);
    let status = client.get(&format!("/api/convert/{id}/status")).await;
    assert_eq!(status.status_code(), 404);

    // ...and from both storage roots
    assert_eq!(dir_entry_count(&app.uploads_dir()), 0);
    assert_eq!(dir_entry_count(&app.outputs_dir()), 0);
}

#[tokio::test]
async fn test_delete_before_conversion_only_touches_upload() {
    let app = setup_test_app().await;
    let client = app.client();

    let id = upload_file(client, "diagram.vsdx", fixtures::build_vsdx(&[("Flow", 1)])).await;

    let response = client.delete(&format!("/api/files/{id}")).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(dir_entry_count(&app.uploads_dir()), 0);
}

#[tokio::test]
async fn test_second_delete_returns_404() {
    let app = setup_test_app().await;
    let client = app.client();

    let id = upload_file(client, "diagram.vsdx", fixtures::build_vsdx(&[("Flow", 1)])).await;

    assert_eq!(
        client
            .delete(&format!("/api/files/{id}"))
            .await
            .status_code(),
        200
    );
    assert_eq!(
        client
            .delete(&format!("/api/files/{id}"))
            .await
            .status_code(),
        404
    );
}

#[tokio::test]
async fn test_delete_unknown_id_returns_404() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.delete(&format!("/api/files/{}", Uuid::new_v4())).await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_root_reports_service_info() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get("/").await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Visio to XML Converter API");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert!(body["paths"].get("/api/upload").is_some());
    assert!(body["paths"].get("/api/convert/{id}").is_some());
}
