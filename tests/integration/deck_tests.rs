//! End-to-end tests of document updates driving the live deck page.

use axum::http::StatusCode;

use super::test_utils::{body_string, get, put_document, test_app};

async fn deck_page(app: &super::test_utils::TestApp) -> String {
    let response = get(&app.router, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_string(response).await
}

#[tokio::test]
async fn test_update_renders_slides_into_page() {
    let app = test_app();

    put_document(&app.router, "# First\n===\n# Second\n--\n# Nested").await;

    let html = deck_page(&app).await;
    assert!(html.contains("<h1>First</h1>"));
    assert!(html.contains("<h1>Second</h1>"));
    assert!(html.contains("<h1>Nested</h1>"));
    // Two groups, three slide sections.
    assert_eq!(html.matches("<section>").count(), 2);
    assert_eq!(html.matches(r#"<section id="slide-"#).count(), 3);
}

#[tokio::test]
async fn test_header_controls_theme_and_title() {
    let app = test_app();

    put_document(&app.router, "---\ntheme: night\ntitle: Live Demo\n---\n# Hi").await;

    let html = deck_page(&app).await;
    assert!(html.contains("css/theme/night.css"));
    assert!(html.contains("<title>Live Demo</title>"));
}

#[tokio::test]
async fn test_removed_slides_disappear_from_page() {
    let app = test_app();

    put_document(&app.router, "# Keep\n--\n# DropA\n--\n# DropB").await;
    put_document(&app.router, "# Keep").await;

    let html = deck_page(&app).await;
    assert!(html.contains("<h1>Keep</h1>"));
    assert!(!html.contains("DropA"));
    assert!(!html.contains("DropB"));
    assert_eq!(html.matches(r#"<section id="slide-"#).count(), 1);
}

#[tokio::test]
async fn test_removed_group_disappears_from_page() {
    let app = test_app();

    put_document(&app.router, "# One\n===\n# Two").await;
    put_document(&app.router, "# One").await;

    let html = deck_page(&app).await;
    assert_eq!(html.matches("<section>").count(), 1);
    assert!(!html.contains("<h1>Two</h1>"));
}

#[tokio::test]
async fn test_scripts_accumulate_styles_sync() {
    let app = test_app();

    put_document(
        &app.router,
        "---\njs:\n  - https://cdn.test/a.js\ncss:\n  - https://cdn.test/a.css\n---\nbody",
    )
    .await;
    put_document(
        &app.router,
        "---\njs:\n  - https://cdn.test/a.js\n  - https://cdn.test/b.js\ncss:\n  - https://cdn.test/b.css\n---\nbody",
    )
    .await;
    // Drop b.js and b.css again.
    put_document(
        &app.router,
        "---\njs:\n  - https://cdn.test/a.js\ncss:\n  - https://cdn.test/a.css\n---\nbody",
    )
    .await;

    let html = deck_page(&app).await;
    // Scripts are one-way: both remain.
    assert!(html.contains("https://cdn.test/a.js"));
    assert!(html.contains("https://cdn.test/b.js"));
    // Styles fully sync: only a.css remains.
    assert!(html.contains("https://cdn.test/a.css"));
    assert!(!html.contains("https://cdn.test/b.css"));
}

#[tokio::test]
async fn test_code_blocks_marked_for_highlighting() {
    let app = test_app();

    put_document(&app.router, "```rust\nfn main() {}\n```").await;

    let html = deck_page(&app).await;
    assert!(html.contains(r#"class="language-rust hljs""#));
}

#[tokio::test]
async fn test_empty_document_still_renders_one_slide() {
    let app = test_app();

    put_document(&app.router, "").await;

    let html = deck_page(&app).await;
    assert_eq!(html.matches(r#"<section id="slide-"#).count(), 1);
}

#[tokio::test]
async fn test_malformed_front_matter_degrades_to_body() {
    let app = test_app();

    put_document(&app.router, "---\n{{bad yaml: [}\n---\n# Still here").await;

    let html = deck_page(&app).await;
    assert!(html.contains("<h1>Still here</h1>"));
    // Falls back to the default theme.
    assert!(html.contains("css/theme/white.css"));
}
