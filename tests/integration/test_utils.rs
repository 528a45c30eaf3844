//! Test utilities for integration tests.
//!
//! Provides an in-memory content store, a router factory over temporary
//! directories, and request helpers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::RwLock;
use tower::ServiceExt;

use mdeck::metadata::MetadataScraper;
use mdeck::render::{CodeBlockMarker, HtmlRenderer};
use mdeck::server::{create_router, AppState, RouterConfig, DEFAULT_ASSET_BASE};
use mdeck::store::MediaStore;
use mdeck::{ContentStore, LocalEngine, Reconciler, StoreError};

// =============================================================================
// In-Memory Content Store
// =============================================================================

/// A content store backed by a map, with write tracking.
#[derive(Default)]
pub struct MemoryContentStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    write_count: Arc<AtomicUsize>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }
}

impl Clone for MemoryContentStore {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            write_count: Arc::clone(&self.write_count),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn read(&self, key: &str) -> Result<String, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn write(&self, key: &str, text: &str) -> Result<(), StoreError> {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        self.entries
            .write()
            .await
            .insert(key.to_string(), text.to_string());
        Ok(())
    }
}

// =============================================================================
// App Factory
// =============================================================================

/// A test application: the router plus handles kept alive for the test.
pub struct TestApp {
    pub router: Router,
    pub content: MemoryContentStore,
    // Held so the media directory outlives the test.
    _media_dir: tempfile::TempDir,
}

/// Build a test app with an in-memory document store and a temporary media
/// directory. The deck engine is ready from the start.
pub fn test_app() -> TestApp {
    let content = MemoryContentStore::new();
    let media_dir = tempfile::tempdir().unwrap();

    let mut deck = Reconciler::new(LocalEngine::new(), HtmlRenderer::new())
        .with_highlighter(Box::new(CodeBlockMarker::new()));
    deck.engine_ready();

    let state = AppState::new(
        content.clone(),
        MediaStore::new(media_dir.path()),
        MetadataScraper::new(),
        deck,
        "content.md",
        DEFAULT_ASSET_BASE,
    );

    let router = create_router(state, RouterConfig::new().with_tracing(false));

    TestApp {
        router,
        content,
        _media_dir: media_dir,
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Send a GET request and return the response.
pub async fn get(router: &Router, uri: &str) -> axum::response::Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.clone().oneshot(request).await.unwrap()
}

/// PUT a raw document to `/api/post`, asserting 201.
pub async fn put_document(router: &Router, raw: &str) {
    let body = serde_json::json!({ "data": raw }).to_string();
    let request = Request::builder()
        .method("PUT")
        .uri("/api/post")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Upload bytes to `/api/media/upload` as a multipart `file` field.
pub async fn upload(router: &Router, filename: &str, data: &[u8]) -> axum::response::Response {
    const BOUNDARY: &str = "mdeck-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/api/media/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

/// Collect a response body as a string.
pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
