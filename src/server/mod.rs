//! HTTP server layer for mdeck.
//!
//! This module provides the editor's REST API and the server-rendered deck
//! page.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │   GET /            PUT /api/post        POST /api/media/upload  │
//! │                                                                 │
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────────────┐  │
//! │  │  handlers   │  │    page      │  │        routes          │  │
//! │  │ (requests)  │  │ (deck shell) │  │   (router config)      │  │
//! │  └─────────────┘  └──────────────┘  └────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod page;
pub mod routes;

pub use handlers::{
    deck_page_handler, document_handler, health_handler, media_handler, metadata_handler,
    update_document_handler, upload_media_handler, AppState, DocumentRequest, DocumentResponse,
    ErrorResponse, HealthResponse, LiveDeck, MediaQueryParams, MetadataQueryParams, UploadError,
    UploadResponse,
};
pub use page::{render_deck_page, DEFAULT_ASSET_BASE};
pub use routes::{create_router, RouterConfig};
