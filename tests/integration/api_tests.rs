//! API integration tests for the document endpoints and health check.

use axum::http::StatusCode;

use super::test_utils::{body_json, body_string, get, put_document, test_app};

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = test_app();

    let response = get(&app.router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

// =============================================================================
// Document Read / Replace
// =============================================================================

#[tokio::test]
async fn test_document_reads_empty_before_first_save() {
    let app = test_app();

    let response = get(&app.router, "/api/post").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"], "");
}

#[tokio::test]
async fn test_document_put_then_get_round_trips() {
    let app = test_app();
    let raw = "---\ntitle: Talk\n---\n# Hello";

    put_document(&app.router, raw).await;

    let response = get(&app.router, "/api/post").await;
    let json = body_json(response).await;
    assert_eq!(json["data"], raw);
}

#[tokio::test]
async fn test_document_put_persists_to_store() {
    let app = test_app();

    put_document(&app.router, "# one").await;
    put_document(&app.router, "# two").await;

    assert_eq!(app.content.write_count(), 2);

    let response = get(&app.router, "/api/post").await;
    assert_eq!(body_json(response).await["data"], "# two");
}

#[tokio::test]
async fn test_document_put_rejects_malformed_body() {
    let app = test_app();

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri("/api/post")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"wrong\": 1}"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Metadata Endpoint (validation only; no network in tests)
// =============================================================================

#[tokio::test]
async fn test_metadata_rejects_invalid_url() {
    let app = test_app();

    let response = get(&app.router, "/api/metadata?url=not%20a%20url").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid_url");
}

#[tokio::test]
async fn test_metadata_rejects_unsupported_scheme() {
    let app = test_app();

    let response = get(&app.router, "/api/metadata?url=ftp%3A%2F%2Fexample.com%2Fx").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metadata_requires_url_parameter() {
    let app = test_app();

    let response = get(&app.router, "/api/metadata").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Deck Page Basics
// =============================================================================

#[tokio::test]
async fn test_deck_page_serves_html() {
    let app = test_app();

    let response = get(&app.router, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_string(response).await;
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("css/theme/white.css"));
}
