//! Upload API integration tests.
//!
//! Run with: `cargo test -p visio2xml-api --test upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{fixtures, setup_test_app, upload_file};

fn dir_entry_count(path: &std::path::Path) -> usize {
    std::fs::read_dir(path).map(|dir| dir.count()).unwrap_or(0)
}

#[tokio::test]
async fn test_upload_registers_entry() {
    let app = setup_test_app().await;
    let client = app.client();

    let data = fixtures::build_vsdx(&[("Flow", 2)]);
    let size = data.len() as u64;
    let id = upload_file(client, "diagram.vsdx", data).await;

    let response = client.get("/api/files").await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 1);

    let entry = &body["files"][0];
    assert_eq!(entry["id"], id.to_string());
    assert_eq!(entry["status"], "uploaded");
    assert_eq!(entry["size_bytes"], size);
    assert_eq!(entry["original_name"], "diagram.vsdx");
    assert_eq!(entry["stored_name"], format!("{id}.vsdx"));

    // raw bytes landed in the uploads root
    assert_eq!(dir_entry_count(&app.uploads_dir()), 1);
}

#[tokio::test]
async fn test_upload_rejects_wrong_extension() {
    let app = setup_test_app().await;
    let client = app.client();

    let part = Part::bytes(bytes::Bytes::from_static(b"hello"))
        .file_name("notes.pdf")
        .mime_type("application/pdf");
    let response = client
        .post("/api/upload")
        .multipart(MultipartForm::new().add_part("file", part))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].as_str().unwrap().contains(".vsd and .vsdx"));

    // nothing registered, nothing written
    let list: serde_json::Value = client.get("/api/files").await.json();
    assert_eq!(list["total"], 0);
    assert_eq!(dir_entry_count(&app.uploads_dir()), 0);
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let app = setup_test_app().await;
    let client = app.client();

    // test config caps uploads at 1MB
    let part = Part::bytes(bytes::Bytes::from(vec![0u8; 1024 * 1024 + 1]))
        .file_name("big.vsdx")
        .mime_type("application/octet-stream");
    let response = client
        .post("/api/upload")
        .multipart(MultipartForm::new().add_part("file", part))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("1MB"));

    assert_eq!(dir_entry_count(&app.uploads_dir()), 0);
}

#[tokio::test]
async fn test_upload_rejects_empty_file() {
    let app = setup_test_app().await;
    let client = app.client();

    let part = Part::bytes(bytes::Bytes::new())
        .file_name("empty.vsdx")
        .mime_type("application/octet-stream");
    let response = client
        .post("/api/upload")
        .multipart(MultipartForm::new().add_part("file", part))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(dir_entry_count(&app.uploads_dir()), 0);
}

#[tokio::test]
async fn test_upload_requires_file_field() {
    let app = setup_test_app().await;
    let client = app.client();

    let part = Part::bytes(bytes::Bytes::from_static(b"data"))
        .file_name("diagram.vsdx")
        .mime_type("application/octet-stream");
    let response = client
        .post("/api/upload")
        .multipart(MultipartForm::new().add_part("attachment", part))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn test_each_upload_gets_a_distinct_id() {
    let app = setup_test_app().await;
    let client = app.client();

    let first = upload_file(client, "a.vsdx", fixtures::build_vsdx(&[("A", 1)])).await;
    let second = upload_file(client, "a.vsdx", fixtures::build_vsdx(&[("A", 1)])).await;
    assert_ne!(first, second);

    let list: serde_json::Value = client.get("/api/files").await.json();
    assert_eq!(list["total"], 2);
}
