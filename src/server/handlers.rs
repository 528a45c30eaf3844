//! HTTP request handlers for the mdeck editor API.
//!
//! # Endpoints
//!
//! - `GET  /` - Server-rendered deck page
//! - `GET  /health` - Health check
//! - `GET  /api/post` - Current raw document
//! - `PUT  /api/post` - Replace the document (drives the live reconciler)
//! - `GET  /api/media` - Serve an uploaded media file
//! - `POST /api/media/upload` - Upload a media file
//! - `GET  /api/metadata` - Scrape link-preview metadata for a URL

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::deck::{LocalEngine, Reconciler};
use crate::error::{MetadataError, StoreError};
use crate::metadata::{MetadataScraper, PageMetadata};
use crate::render::HtmlRenderer;
use crate::store::{ContentStore, MediaStore, BROWSER_DEFAULT_NAME};

use super::page::render_deck_page;

/// The reconciler the server drives: local engine, pulldown-cmark renderer.
pub type LiveDeck = Reconciler<LocalEngine, HtmlRenderer>;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state, passed to all handlers via Axum's State
/// extractor.
///
/// The live deck sits behind a single async mutex: document updates are
/// serialized, so one reconciliation runs to completion before the next.
pub struct AppState<C: ContentStore> {
    /// Document store
    pub content: Arc<C>,

    /// Uploaded media store
    pub media: Arc<MediaStore>,

    /// Page-metadata scraper
    pub scraper: Arc<MetadataScraper>,

    /// The live presentation, reconciled on every document update
    pub deck: Arc<tokio::sync::Mutex<LiveDeck>>,

    /// Store key of the deck document
    pub document_key: String,

    /// Base URL for the presentation runtime's assets in the deck page
    pub asset_base: String,

    /// Cache-Control max-age for media responses, in seconds
    pub cache_max_age: u32,
}

impl<C: ContentStore> AppState<C> {
    /// Create application state around the given components.
    pub fn new(
        content: C,
        media: MediaStore,
        scraper: MetadataScraper,
        deck: LiveDeck,
        document_key: impl Into<String>,
        asset_base: impl Into<String>,
    ) -> Self {
        Self {
            content: Arc::new(content),
            media: Arc::new(media),
            scraper: Arc::new(scraper),
            deck: Arc::new(tokio::sync::Mutex::new(deck)),
            document_key: document_key.into(),
            asset_base: asset_base.into(),
            cache_max_age: 3600,
        }
    }

    /// Set the media Cache-Control max-age.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }
}

impl<C: ContentStore> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            content: Arc::clone(&self.content),
            media: Arc::clone(&self.media),
            scraper: Arc::clone(&self.scraper),
            deck: Arc::clone(&self.deck),
            document_key: self.document_key.clone(),
            asset_base: self.asset_base.clone(),
            cache_max_age: self.cache_max_age,
        }
    }
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Body of `PUT /api/post`.
#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    /// The full raw document text
    pub data: String,
}

/// Response of `GET /api/post`.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    /// The full raw document text (empty when never saved)
    pub data: String,
}

/// Query parameters for `GET /api/media`.
#[derive(Debug, Deserialize)]
pub struct MediaQueryParams {
    /// Media filename as returned by the upload endpoint
    pub q: String,
}

/// Response of `POST /api/media/upload`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Final filename within the media store
    pub filename: String,

    /// URL the file is served from
    pub url: String,
}

/// Query parameters for `GET /api/metadata`.
#[derive(Debug, Deserialize)]
pub struct MetadataQueryParams {
    /// Page URL to scrape
    pub url: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "invalid_request")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

fn error_response(status: StatusCode, error_type: &str, message: String) -> Response {
    if status.is_server_error() {
        error!(
            error_type = error_type,
            status = status.as_u16(),
            "{}",
            message
        );
    } else if status == StatusCode::NOT_FOUND {
        debug!(
            error_type = error_type,
            status = status.as_u16(),
            "{}",
            message
        );
    } else {
        warn!(
            error_type = error_type,
            status = status.as_u16(),
            "{}",
            message
        );
    }

    let body = ErrorResponse::with_status(error_type, message, status);
    (status, Json(body)).into_response()
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            StoreError::InvalidKey(_) => (StatusCode::BAD_REQUEST, "invalid_key"),
            StoreError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
        };
        error_response(status, error_type, self.to_string())
    }
}

impl IntoResponse for MetadataError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            MetadataError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "invalid_url"),
            MetadataError::Fetch(_) => (StatusCode::BAD_GATEWAY, "fetch_failed"),
        };
        error_response(status, error_type, self.to_string())
    }
}

/// Errors from the upload endpoint.
#[derive(Debug)]
pub enum UploadError {
    /// The multipart body had no `file` field
    MissingFile,

    /// The multipart body could not be decoded
    Multipart(String),

    /// Storing the file failed
    Store(StoreError),
}

impl From<StoreError> for UploadError {
    fn from(err: StoreError) -> Self {
        UploadError::Store(err)
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match self {
            UploadError::MissingFile => error_response(
                StatusCode::BAD_REQUEST,
                "missing_file",
                "multipart body must contain a 'file' field".to_string(),
            ),
            UploadError::Multipart(message) => {
                error_response(StatusCode::BAD_REQUEST, "invalid_multipart", message)
            }
            UploadError::Store(err) => err.into_response(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Return the current raw document.
///
/// # Endpoint
///
/// `GET /api/post`
///
/// # Response
///
/// `200 OK` with `{"data": "<raw document>"}`; a never-saved document
/// reads as the empty string.
pub async fn document_handler<C: ContentStore>(
    State(state): State<AppState<C>>,
) -> Result<Json<DocumentResponse>, StoreError> {
    let data = state.content.read(&state.document_key).await?;
    Ok(Json(DocumentResponse { data }))
}

/// Replace the document and reconcile the live deck.
///
/// # Endpoint
///
/// `PUT /api/post`
///
/// # Response
///
/// `201 Created` on success. The update is persisted first, then pushed
/// into the reconciler; the deck page reflects it immediately.
pub async fn update_document_handler<C: ContentStore>(
    State(state): State<AppState<C>>,
    Json(request): Json<DocumentRequest>,
) -> Result<StatusCode, StoreError> {
    state
        .content
        .write(&state.document_key, &request.data)
        .await?;

    state.deck.lock().await.update(&request.data);

    Ok(StatusCode::CREATED)
}

/// Serve an uploaded media file.
///
/// # Endpoint
///
/// `GET /api/media?q=<filename>`
///
/// # Response
///
/// `200 OK` with the stored bytes and a content type guessed from the
/// extension; `404 Not Found` for unknown filenames.
pub async fn media_handler<C: ContentStore>(
    State(state): State<AppState<C>>,
    Query(query): Query<MediaQueryParams>,
) -> Result<Response, StoreError> {
    let bytes = state.media.open(&query.q).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&query.q))
        .header(
            header::CACHE_CONTROL,
            format!("public, max-age={}", state.cache_max_age),
        )
        .body(axum::body::Body::from(bytes))
        .unwrap();

    Ok(response)
}

/// Accept a media upload.
///
/// # Endpoint
///
/// `POST /api/media/upload` (multipart, field name `file`)
///
/// # Response
///
/// `200 OK` with `{"filename": "...", "url": "/api/media?q=..."}`.
pub async fn upload_media_handler<C: ContentStore>(
    State(state): State<AppState<C>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field
            .file_name()
            .unwrap_or(BROWSER_DEFAULT_NAME)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;

        let stored = state.media.store(&bytes, &name).await?;
        debug!(filename = %stored.filename, size = bytes.len(), "stored upload");

        return Ok(Json(UploadResponse {
            filename: stored.filename,
            url: stored.url,
        }));
    }

    Err(UploadError::MissingFile)
}

/// Scrape link-preview metadata for a URL.
///
/// # Endpoint
///
/// `GET /api/metadata?url=<url>`
///
/// # Response
///
/// `200 OK` with the extracted metadata; `400` for unparseable URLs,
/// `502` when the page cannot be fetched.
pub async fn metadata_handler<C: ContentStore>(
    State(state): State<AppState<C>>,
    Query(query): Query<MetadataQueryParams>,
) -> Result<Json<PageMetadata>, MetadataError> {
    let metadata = state.scraper.scrape(&query.url).await?;
    Ok(Json(metadata))
}

/// Serve the deck page: the presentation shell around the live tree.
///
/// # Endpoint
///
/// `GET /`
pub async fn deck_page_handler<C: ContentStore>(
    State(state): State<AppState<C>>,
) -> Html<String> {
    let deck = state.deck.lock().await;
    Html(render_deck_page(
        deck.state(),
        deck.tree(),
        deck.assets(),
        &state.asset_base,
    ))
}

/// Content type for a stored media filename, by extension.
fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

// =============================================================================
// Tests
// =============================================================================
