//! Presentation engine capability surface.
//!
//! The reconciler never talks to a concrete presentation runtime; it only
//! requires the five operations below. Any engine satisfying them is
//! substitutable, which is also what makes the reconciler testable without
//! a browser.

use std::collections::BTreeMap;

/// Opaque engine configuration: the front-matter keys the deck itself does
/// not interpret.
pub type EngineConfig = BTreeMap<String, serde_yaml::Value>;

/// The operations the reconciler requires from a presentation runtime.
///
/// The engine's backing asset is typically loaded asynchronously, so the
/// engine may not be ready when the first document update arrives;
/// [`is_ready`](Self::is_ready) gates the operations that need a live
/// runtime (see `Reconciler::engine_ready`).
pub trait PresentationEngine: Send {
    /// Whether the runtime is initialized and able to accept configuration.
    fn is_ready(&self) -> bool;

    /// Initialize the runtime with the given configuration. Called at most
    /// once, when the engine first signals readiness.
    fn initialize(&mut self, config: &EngineConfig);

    /// Apply updated configuration to a running engine.
    fn configure(&mut self, config: &EngineConfig);

    /// Force the engine to re-derive its current slide index. Configuration
    /// changes can alter layout, which invalidates the index.
    fn force_slide_resync(&mut self);

    /// Re-synchronize the engine with the current presentation tree.
    fn sync(&mut self);
}

/// An in-process engine implementation.
///
/// `LocalEngine` records the configuration applied to it and counts the
/// lifecycle calls it receives. The server uses it as the engine behind the
/// server-rendered deck page; tests use it to observe reconciler behavior.
///
/// The engine starts not-ready, mirroring a runtime whose backing asset is
/// still loading; [`initialize`](PresentationEngine::initialize) makes it
/// ready.
#[derive(Debug, Default)]
pub struct LocalEngine {
    ready: bool,
    config: EngineConfig,
    configure_calls: usize,
    resync_calls: usize,
    sync_calls: usize,
}

impl LocalEngine {
    /// Create an engine that has not yet signalled readiness.
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration last applied via `initialize` or `configure`.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of `configure` calls received.
    pub fn configure_calls(&self) -> usize {
        self.configure_calls
    }

    /// Number of `force_slide_resync` calls received.
    pub fn resync_calls(&self) -> usize {
        self.resync_calls
    }

    /// Number of `sync` calls received.
    pub fn sync_calls(&self) -> usize {
        self.sync_calls
    }
}

impl PresentationEngine for LocalEngine {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn initialize(&mut self, config: &EngineConfig) {
        self.config = config.clone();
        self.ready = true;
    }

    fn configure(&mut self, config: &EngineConfig) {
        self.config = config.clone();
        self.configure_calls += 1;
    }

    fn force_slide_resync(&mut self) {
        self.resync_calls += 1;
    }

    fn sync(&mut self) {
        self.sync_calls += 1;
    }
}

// =============================================================================
// Tests
// =============================================================================
