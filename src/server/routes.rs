//! Router configuration for mdeck.
//!
//! # Route Structure
//!
//! ```text
//! /                     - Server-rendered deck page
//! /health               - Health check
//! /api/post             - Document read/replace
//! /api/media            - Serve uploaded media
//! /api/media/upload     - Multipart upload
//! /api/metadata         - Link-preview metadata
//! ```
//!
//! # Example
//!
//! ```ignore
//! use mdeck::server::{create_router, AppState, RouterConfig};
//!
//! let state = AppState::new(content, media, scraper, deck, "content.md", asset_base);
//! let router = create_router(state, RouterConfig::new());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::ContentStore;

use super::handlers::{
    deck_page_handler, document_handler, health_handler, media_handler, metadata_handler,
    update_document_handler, upload_media_handler, AppState,
};

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a configuration with tracing enabled and CORS open to any
    /// origin.
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the application router.
///
/// Builds the complete Axum router with the deck page, the editor API,
/// CORS, and optional request tracing.
pub fn create_router<C>(state: AppState<C>, config: RouterConfig) -> Router
where
    C: ContentStore + 'static,
{
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/", get(deck_page_handler::<C>))
        .route("/health", get(health_handler))
        .route(
            "/api/post",
            get(document_handler::<C>).put(update_document_handler::<C>),
        )
        .route("/api/media", get(media_handler::<C>))
        .route("/api/media/upload", post(upload_media_handler::<C>))
        .route("/api/metadata", get(metadata_handler::<C>))
        .with_state(state)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
