//! mdeck - a live-editing server for markdown slide decks.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdeck::{
    config::Config,
    deck::{LocalEngine, Reconciler},
    metadata::MetadataScraper,
    render::{CodeBlockMarker, HtmlRenderer},
    server::{create_router, AppState, RouterConfig},
    store::{ContentStore, FsContentStore, MediaStore},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let data_dir = config.resolve_data_dir();

    info!("mdeck v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Data directory: {}", data_dir.display());
    info!("  Document: {}", config.document_key);
    info!("  Runtime assets: {}", config.asset_base);

    // Build stores and the metadata scraper
    let content = FsContentStore::new(&data_dir);
    let media = MediaStore::new(&data_dir);
    let scraper = MetadataScraper::with_cache_capacity(config.metadata_cache);

    // Seed the live deck from the stored document (empty on first run)
    let mut deck = Reconciler::new(LocalEngine::new(), HtmlRenderer::new())
        .with_highlighter(Box::new(CodeBlockMarker::new()));

    match content.read(&config.document_key).await {
        Ok(raw) => deck.update(&raw),
        Err(e) => {
            error!("Failed to read document: {}", e);
            return ExitCode::FAILURE;
        }
    }
    deck.engine_ready();

    // Build application state and router
    let state = AppState::new(
        content,
        media,
        scraper,
        deck,
        &config.document_key,
        &config.asset_base,
    )
    .with_cache_max_age(config.cache_max_age);

    let router_config = build_router_config(&config);
    let router = create_router(state, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  View the deck in your browser:");
    info!("    open http://{}/", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/api/post", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "mdeck=debug,tower_http=debug"
    } else {
        "mdeck=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new().with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
