//! Configuration management for mdeck.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `MDECK_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Environment Variables
//!
//! - `MDECK_HOST` - Server bind address (default: 127.0.0.1)
//! - `MDECK_PORT` - Server port (default: 3000)
//! - `MDECK_DATA_DIR` - Directory for the document and uploads (default:
//!   a fresh timestamped directory under `out/`)
//! - `MDECK_DOCUMENT_KEY` - Filename of the deck document (default: content.md)
//! - `MDECK_ASSET_BASE` - Base URL for the presentation runtime's assets
//! - `MDECK_METADATA_CACHE` - Max cached metadata entries (default: 256)
//! - `MDECK_CACHE_MAX_AGE` - HTTP cache max-age for media, seconds (default: 3600)

use std::path::PathBuf;

use chrono::Local;
use clap::Parser;

use crate::metadata::DEFAULT_METADATA_CACHE_CAPACITY;
use crate::server::page::DEFAULT_ASSET_BASE;
use crate::store::DEFAULT_DOCUMENT_KEY;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host. The editor is a local tool, so it binds loopback.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default HTTP cache max-age for media responses (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

// =============================================================================
// CLI Arguments
// =============================================================================

/// mdeck - a live-editing server for markdown slide decks.
///
/// Stores one markdown document with YAML front matter, serves it over a
/// small REST API, and renders it as an incrementally updated slide deck.
#[derive(Parser, Debug, Clone)]
#[command(name = "mdeck")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "MDECK_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "MDECK_PORT")]
    pub port: u16,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Directory holding the document and uploaded media.
    ///
    /// When not set, a fresh timestamped directory under `out/` is used,
    /// so every session starts with a blank deck.
    #[arg(long, env = "MDECK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Filename of the deck document inside the data directory.
    #[arg(long, default_value = DEFAULT_DOCUMENT_KEY, env = "MDECK_DOCUMENT_KEY")]
    pub document_key: String,

    // =========================================================================
    // Deck Page Configuration
    // =========================================================================
    /// Base URL for the presentation runtime's own assets in the deck page.
    #[arg(long, default_value = DEFAULT_ASSET_BASE, env = "MDECK_ASSET_BASE")]
    pub asset_base: String,

    /// HTTP Cache-Control max-age for media responses, in seconds.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "MDECK_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    // =========================================================================
    // Metadata Configuration
    // =========================================================================
    /// Maximum number of scraped page-metadata entries to cache.
    #[arg(long, default_value_t = DEFAULT_METADATA_CACHE_CAPACITY, env = "MDECK_METADATA_CACHE")]
    pub metadata_cache: usize,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "MDECK_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.document_key.is_empty() || self.document_key.contains('/') {
            return Err(format!(
                "document_key must be a plain filename, got {:?}",
                self.document_key
            ));
        }

        if self.asset_base.is_empty() {
            return Err("asset_base must not be empty".to_string());
        }

        if self.metadata_cache == 0 {
            return Err("metadata_cache must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolve the data directory: the configured one, or a fresh
    /// timestamped directory under `out/`.
    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => PathBuf::from("out").join(Local::now().format("%Y-%m-%dT%H-%M-%S").to_string()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
