//! # mdeck
//!
//! A live-editing server for markdown-driven slide decks.
//!
//! mdeck stores a single markdown document with YAML front matter, serves
//! it through a small REST API, and maintains a live presentation tree
//! that is incrementally reconciled on every edit: unchanged slides keep
//! their node identity, changed slides are re-rendered in place, removed
//! slides are pruned.
//!
//! ## Document format
//!
//! ```text
//! ---
//! theme: black
//! title: My Talk
//! ---
//! # First slide
//! ===
//! Second group
//! --
//! A vertical sub-slide
//! ```
//!
//! A line of `===` separates horizontal groups; a line of `--` separates
//! vertical sub-slides within a group. Front-matter keys other than
//! `theme`, `title`, `js`, and `css` are passed through to the
//! presentation engine as configuration.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`matter`] - Front-matter splitter (`parse`/`serialize`)
//! - [`deck`] - Slide grid, presentation tree, and the reconciler
//! - [`render`] - Per-slide markdown rendering and code-block marking
//! - [`store`] - Document and media persistence
//! - [`metadata`] - Link-preview metadata scraping
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust
//! use mdeck::deck::{LocalEngine, Reconciler};
//! use mdeck::render::HtmlRenderer;
//!
//! let mut deck = Reconciler::new(LocalEngine::new(), HtmlRenderer::new());
//! deck.engine_ready();
//!
//! deck.update("# Hello\n===\n# World");
//! assert_eq!(deck.tree().group_count(), 2);
//!
//! // Editing one slide re-renders it in place; the other keeps its node.
//! let untouched = deck.tree().slide(1, 0).unwrap().node_id();
//! deck.update("# Hello, edited\n===\n# World");
//! assert_eq!(deck.tree().slide(1, 0).unwrap().node_id(), untouched);
//! ```

pub mod config;
pub mod deck;
pub mod error;
pub mod matter;
pub mod metadata;
pub mod render;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use deck::{
    DeckState, DeckTree, Element, EngineConfig, GroupNode, InjectedAssets, LocalEngine, NodeId,
    PresentationEngine, Reconciler, SlideGrid, SlideNode,
};
pub use error::{MetadataError, StoreError};
pub use matter::{parse, serialize, DeckOptions, Document, DEFAULT_THEME};
pub use metadata::{MetadataScraper, PageMetadata};
pub use render::{CodeBlockMarker, Highlighter, HtmlRenderer, SlideRenderer};
pub use server::{create_router, AppState, LiveDeck, RouterConfig};
pub use store::{ContentStore, FsContentStore, MediaStore, StoredMedia, DEFAULT_DOCUMENT_KEY};
