//! Media upload and serving tests.

use axum::http::StatusCode;

use super::test_utils::{body_json, get, test_app, upload};

#[tokio::test]
async fn test_upload_then_fetch_round_trips() {
    let app = test_app();

    let response = upload(&app.router, "diagram.png", b"png-bytes").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["filename"], "diagram.png");
    let url = json["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/api/media?q="));

    let response = get(&app.router, &url).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );
    assert!(response.headers().contains_key("cache-control"));

    let body = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    assert_eq!(&body[..], b"png-bytes");
}

#[tokio::test]
async fn test_upload_renames_browser_default() {
    let app = test_app();

    let response = upload(&app.router, "image.png", b"pasted").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let filename = json["filename"].as_str().unwrap();
    assert_ne!(filename, "image.png");
    assert!(filename.ends_with(".png"));
}

#[tokio::test]
async fn test_upload_collision_gets_unique_name() {
    let app = test_app();

    let first = body_json(upload(&app.router, "pic.png", b"one").await).await;
    let second = body_json(upload(&app.router, "pic.png", b"two").await).await;

    assert_eq!(first["filename"], "pic.png");
    assert_ne!(second["filename"], first["filename"]);

    // Both stay individually retrievable.
    let response = get(&app.router, second["url"].as_str().unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_media_is_404() {
    let app = test_app();

    let response = get(&app.router, "/api/media?q=ghost.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_traversal_key_is_rejected() {
    let app = test_app();

    let response = get(&app.router, "/api/media?q=..%2F..%2Fetc%2Fpasswd").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid_key");
}

#[tokio::test]
async fn test_upload_without_file_field_is_400() {
    let app = test_app();

    const BOUNDARY: &str = "mdeck-test-boundary";
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--{BOUNDARY}--\r\n"
    );

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/media/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "missing_file");
}
