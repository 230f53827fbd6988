//! FileStore behaviour against a local double of the contents API and raw mirror

use depot_store::{ContentKind, FileContent, FileStorage, FileStore, StoreConfig};
use httpmock::prelude::*;
use serde_json::json;

const CONTENTS: &str = "/repos/octo/notes/contents";
const RAW: &str = "/octo/notes/main";

fn store_for(server: &MockServer) -> FileStore {
    let config = StoreConfig::new("octo", "notes")
        .token("ghp_test")
        .api_url(server.base_url())
        .raw_url(server.base_url());
    FileStore::new(&config).unwrap()
}

fn entry(name: &str, base64: &str, size: u64, sha: &str) -> serde_json::Value {
    json!({
        "type": "file",
        "encoding": "base64",
        "size": size,
        "name": name,
        "path": name,
        "content": base64,
        "sha": sha,
        "url": format!("https://api.github.com/repos/octo/notes/contents/{}?ref=main", name),
        "git_url": format!("https://api.github.com/repos/octo/notes/git/blobs/{}", sha),
        "html_url": format!("https://github.com/octo/notes/blob/main/{}", name),
        "download_url": format!("https://raw.githubusercontent.com/octo/notes/main/{}", name),
    })
}

#[tokio::test]
async fn test_readme_structured_and_raw_reads_agree() {
    let server = MockServer::start_async().await;
    let contents = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{}/README.md", CONTENTS))
                .query_param("ref", "main")
                .header("authorization", "Bearer ghp_test");
            then.status(200)
                .json_body(entry("README.md", "aGVsbG8K\n", 6, "3b18e512"));
        })
        .await;
    let raw = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/README.md", RAW));
            then.status(200).body("hello\n");
        })
        .await;

    let store = store_for(&server);

    let record = store.get("README.md", ContentKind::Text).await.unwrap();
    assert_eq!(record.content, FileContent::Text("hello\n".to_string()));
    assert_eq!(record.size, 6);
    assert_eq!(record.sha, "3b18e512");
    assert_eq!(record.item_type, "file");
    assert_eq!(record.encoding, "base64");
    assert_eq!(
        record.html_url.as_deref(),
        Some("https://github.com/octo/notes/blob/main/README.md")
    );

    let body = store.raw("README.md", ContentKind::Text).await.unwrap();
    assert_eq!(body, record.content);

    contents.assert_async().await;
    raw.assert_async().await;
}

#[tokio::test]
async fn test_binary_reads_return_original_bytes() {
    let server = MockServer::start_async().await;
    let bytes: Vec<u8> = vec![0x89, 0x50, 0x4e, 0x47, 0x00, 0xff];
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/logo.png", CONTENTS));
            then.status(200)
                .json_body(entry("logo.png", "iVBORwD/", 6, "feed"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/logo.png", RAW));
            then.status(200).body(vec![0x89, 0x50, 0x4e, 0x47, 0x00, 0xff]);
        })
        .await;

    let store = store_for(&server);

    let record = store.get("logo.png", ContentKind::Binary).await.unwrap();
    assert_eq!(record.content, FileContent::Binary(bytes.clone()));

    let raw = store.raw("logo.png", ContentKind::Binary).await.unwrap();
    assert_eq!(raw.into_bytes(), bytes);

    // Not UTF-8, so a text read cannot succeed
    assert!(store.get("logo.png", ContentKind::Text).await.is_none());
}

#[tokio::test]
async fn test_missing_file_is_absent_on_every_read_path() {
    let server = MockServer::start_async().await;
    let contents = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/missing.txt", CONTENTS));
            then.status(404).json_body(json!({ "message": "Not Found" }));
        })
        .await;
    let raw = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/missing.txt", RAW));
            then.status(404).body("404: Not Found");
        })
        .await;

    let store = store_for(&server);

    assert!(!store.exist("missing.txt").await);
    assert!(store.get("missing.txt", ContentKind::Text).await.is_none());
    assert!(store.raw("missing.txt", ContentKind::Text).await.is_none());

    contents.assert_calls_async(2).await;
    raw.assert_async().await;
}

#[tokio::test]
async fn test_exist_true_for_present_file() {
    let server = MockServer::start_async().await;
    let contents = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/docs/a.md", CONTENTS));
            then.status(200).json_body(entry("a.md", "YQ==", 1, "aa"));
        })
        .await;

    let store = store_for(&server);

    assert!(store.exist("docs/a.md").await);
    contents.assert_async().await;
}

#[tokio::test]
async fn test_network_failure_is_reported_as_absent() {
    let config = StoreConfig::new("octo", "notes")
        .api_url("http://127.0.0.1:1")
        .raw_url("http://127.0.0.1:1");
    let store = FileStore::new(&config).unwrap();

    assert!(!store.exist("a.txt").await);
    assert!(store.get("a.txt", ContentKind::Text).await.is_none());
    assert!(store.raw("a.txt", ContentKind::Binary).await.is_none());
    assert!(!store.create("a.txt", "x").await);
    assert!(!store.commit("a.txt", b"x", None).await);
    assert!(!store.delete("a.txt", None).await);
}

#[tokio::test]
async fn test_commit_resolves_revision_before_writing() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/a.txt", CONTENTS));
            then.status(200).json_body(entry("a.txt", "b2xkCg==", 4, "abc123"));
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("{}/a.txt", CONTENTS))
                .header("authorization", "Bearer ghp_test")
                .json_body_includes(r#"{"content":"bmV3Cg==","sha":"abc123","branch":"main"}"#);
            then.status(200).json_body(json!({ "content": {}, "commit": {} }));
        })
        .await;

    let store = store_for(&server);

    assert!(store.commit("a.txt", b"new\n", None).await);
    lookup.assert_async().await;
    write.assert_async().await;
}

#[tokio::test]
async fn test_commit_with_known_revision_skips_lookup() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/a.txt", CONTENTS));
            then.status(200).json_body(entry("a.txt", "", 0, "stale"));
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("{}/a.txt", CONTENTS))
                .json_body_includes(r#"{"sha":"held-by-caller"}"#);
            then.status(200);
        })
        .await;

    let store = store_for(&server);

    assert!(store.commit("a.txt", b"x", Some("held-by-caller")).await);
    lookup.assert_calls_async(0).await;
    write.assert_async().await;
}

#[tokio::test]
async fn test_commit_aborts_when_revision_lookup_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/gone.txt", CONTENTS));
            then.status(404);
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(PUT).path(format!("{}/gone.txt", CONTENTS));
            then.status(200);
        })
        .await;

    let store = store_for(&server);

    assert!(!store.commit("gone.txt", b"data", None).await);
    write.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_commit_reports_upstream_conflict() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path(format!("{}/a.txt", CONTENTS));
            then.status(409)
                .json_body(json!({ "message": "a.txt does not match abc" }));
        })
        .await;

    let store = store_for(&server);

    assert!(!store.commit("a.txt", b"x", Some("abc")).await);
}

#[tokio::test]
async fn test_delete_without_revision_and_missing_file_makes_no_delete_call() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/a.txt", CONTENTS));
            then.status(404);
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path(format!("{}/a.txt", CONTENTS));
            then.status(200);
        })
        .await;

    let store = store_for(&server);

    assert!(!store.delete("a.txt", None).await);
    lookup.assert_async().await;
    delete.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_delete_resolves_revision_then_deletes() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/a.txt", CONTENTS));
            then.status(200).json_body(entry("a.txt", "eAo=", 2, "def456"));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path(format!("{}/a.txt", CONTENTS))
                .json_body_includes(r#"{"sha":"def456","branch":"main"}"#);
            then.status(200).json_body(json!({ "content": null, "commit": {} }));
        })
        .await;

    let store = store_for(&server);

    assert!(store.delete("a.txt", None).await);
    lookup.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_create_sends_encoded_text_without_lookup() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/new.md", CONTENTS));
            then.status(404);
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("{}/new.md", CONTENTS))
                .json_body_includes(r#"{"content":"aGVsbG8K","branch":"main"}"#);
            then.status(201).json_body(json!({ "content": {}, "commit": {} }));
        })
        .await;

    let store = store_for(&server);

    assert!(store.create("new.md", "hello\n").await);
    lookup.assert_calls_async(0).await;
    write.assert_async().await;
}

#[tokio::test]
async fn test_create_rejected_when_file_exists() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path(format!("{}/taken.md", CONTENTS));
            then.status(422)
                .json_body(json!({ "message": "Invalid request.\n\n\"sha\" wasn't supplied." }));
        })
        .await;

    let store = store_for(&server);

    assert!(!store.create("taken.md", "x").await);
}

#[tokio::test]
async fn test_resolve_revision_for_binary_file() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/blob.bin", CONTENTS));
            then.status(200).json_body(entry("blob.bin", "//4=", 2, "b1n"));
        })
        .await;

    let store = store_for(&server);

    assert_eq!(store.resolve_revision("blob.bin").await.as_deref(), Some("b1n"));
}

#[tokio::test]
async fn test_binary_commit_reads_back_identical_bytes() {
    let server = MockServer::start_async().await;
    let bytes: Vec<u8> = vec![0x89, 0x00, 0xff];
    let write = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("{}/blob.bin", CONTENTS))
                .json_body_includes(r#"{"content":"iQD/","sha":"b1n"}"#);
            then.status(200).json_body(json!({ "content": {}, "commit": {} }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/blob.bin", CONTENTS));
            then.status(200).json_body(entry("blob.bin", "iQD/", 3, "b2n"));
        })
        .await;

    let store = store_for(&server);

    assert!(store.commit("blob.bin", &bytes, Some("b1n")).await);
    write.assert_async().await;

    let record = store.get("blob.bin", ContentKind::Binary).await.unwrap();
    assert_eq!(record.content, FileContent::Binary(bytes));
    assert_eq!(record.size, 3);
}
