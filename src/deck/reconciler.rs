//! The slide reconciler: incremental updates of the live presentation tree.
//!
//! [`Reconciler::update`] takes the full raw document text (editor
//! keystroke or initial load), re-parses the front matter, re-splits the
//! body into a slide grid, and diffs that grid against the previously
//! rendered one:
//!
//! - unchanged coordinates keep their node identity and are re-rendered in
//!   place
//! - new coordinates get fresh nodes (and group containers)
//! - vanished coordinates are pruned, walking the old grid in reverse so
//!   sibling removal never invalidates indices
//!
//! Header side effects (theme, title, engine configuration, injected
//! assets) are reconciled first. The structural-equality short-circuit on
//! the passthrough configuration is what keeps a keystroke from resetting
//! the slide position on every update.
//!
//! The reconciler is a plain sequential state machine: one `update` runs
//! to completion before the next, and there is no interior locking. Engine
//! work that needs a live runtime is queued as pending operations and
//! drained by [`Reconciler::engine_ready`]; pending work re-reads current
//! state when it runs instead of trusting a snapshot captured at schedule
//! time.

use tracing::debug;

use crate::matter::{self, DeckOptions, DEFAULT_THEME};
use crate::render::{Highlighter, SlideRenderer};

use super::assets::{short_hash, InjectedAssets};
use super::engine::{EngineConfig, PresentationEngine};
use super::grid::SlideGrid;
use super::tree::{DeckTree, Element};

// =============================================================================
// Deck State
// =============================================================================

/// Presentation state owned by the reconciler for the session lifetime.
#[derive(Debug, Clone)]
pub struct DeckState {
    theme: String,
    title: String,
    applied_config: EngineConfig,
}

impl Default for DeckState {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            title: String::new(),
            applied_config: EngineConfig::new(),
        }
    }
}

impl DeckState {
    /// The current theme name.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// The current page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The engine configuration last applied.
    pub fn applied_config(&self) -> &EngineConfig {
        &self.applied_config
    }
}

/// Engine work deferred until the engine signals readiness.
///
/// Stored as values rather than captured closures: a later update may
/// change the state a pending operation depends on, so the operation
/// re-reads current state when it finally runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingOp {
    /// Re-apply the current configuration and force a slide resync.
    Reconfigure,
}

// =============================================================================
// Reconciler
// =============================================================================

/// Maintains the live presentation tree from successive document updates.
///
/// # Type Parameters
///
/// * `E` - The presentation engine (see [`PresentationEngine`])
/// * `R` - The per-slide markdown renderer
pub struct Reconciler<E: PresentationEngine, R: SlideRenderer> {
    engine: E,
    renderer: R,
    highlighter: Option<Box<dyn Highlighter>>,
    tree: DeckTree,
    assets: InjectedAssets,
    state: DeckState,
    grid: SlideGrid,
    pending: Vec<PendingOp>,
    engine_initialized: bool,
}

impl<E: PresentationEngine, R: SlideRenderer> Reconciler<E, R> {
    /// Create a reconciler around an engine and renderer.
    pub fn new(engine: E, renderer: R) -> Self {
        Self {
            engine,
            renderer,
            highlighter: None,
            tree: DeckTree::new(),
            assets: InjectedAssets::new(),
            state: DeckState::default(),
            grid: SlideGrid::default(),
            pending: Vec::new(),
            engine_initialized: false,
        }
    }

    /// Attach a highlighting pass applied after each slide render.
    pub fn with_highlighter(mut self, highlighter: Box<dyn Highlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// The current presentation tree.
    pub fn tree(&self) -> &DeckTree {
        &self.tree
    }

    /// The current presentation state.
    pub fn state(&self) -> &DeckState {
        &self.state
    }

    /// The currently injected assets.
    pub fn assets(&self) -> &InjectedAssets {
        &self.assets
    }

    /// The engine this reconciler drives.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Push a full document update into the live presentation.
    pub fn update(&mut self, raw: &str) {
        let doc = matter::parse(raw);
        self.apply_header(&doc.header);
        self.apply_content(&doc.content);
    }

    /// Signal that the engine's backing runtime has finished loading.
    ///
    /// Initializes the engine (once) with the current configuration and
    /// drains any operations deferred while the engine was not ready.
    pub fn engine_ready(&mut self) {
        if !self.engine_initialized {
            self.engine.initialize(&self.state.applied_config);
            self.engine_initialized = true;
        }

        for op in std::mem::take(&mut self.pending) {
            match op {
                PendingOp::Reconfigure => self.run_reconfigure(),
            }
        }
    }

    // =========================================================================
    // Header reconciliation
    // =========================================================================

    fn apply_header(&mut self, header: &DeckOptions) {
        self.state.theme = header.theme().to_string();
        self.state.title = header.title().to_string();

        // The critical short-circuit: re-applying configuration on every
        // keystroke would reset the slide position.
        if self.state.applied_config != header.passthrough {
            self.state.applied_config = header.passthrough.clone();
            self.schedule(PendingOp::Reconfigure);
        }

        for asset in self.assets.reconcile_scripts(&header.js) {
            debug!(id = %asset.id, url = %asset.url, "injected script");
        }

        let styles = self.assets.reconcile_styles(&header.css);
        for asset in &styles.injected {
            debug!(id = %asset.id, url = %asset.url, "injected stylesheet");
        }
        for id in &styles.removed {
            debug!(id = %id, "removed stylesheet");
        }
    }

    fn schedule(&mut self, op: PendingOp) {
        if self.engine.is_ready() {
            match op {
                PendingOp::Reconfigure => self.run_reconfigure(),
            }
        } else if !self.pending.contains(&op) {
            self.pending.push(op);
        }
    }

    fn run_reconfigure(&mut self) {
        self.engine.configure(&self.state.applied_config);
        self.engine.force_slide_resync();
        self.engine.sync();
    }

    // =========================================================================
    // Slide-grid reconciliation
    // =========================================================================

    fn apply_content(&mut self, content: &str) {
        let new_grid = SlideGrid::split(content);

        for (x, slides) in new_grid.groups().iter().enumerate() {
            for (y, source) in slides.iter().enumerate() {
                self.render_slide(x, y, source);
            }
        }

        self.prune(new_grid);
    }

    /// Render the slide at `(x, y)`. An existing node at a coordinate that
    /// also existed in the old grid is re-rendered in place, preserving its
    /// identity; anything else gets a fresh node.
    fn render_slide(&mut self, x: usize, y: usize, source: &str) {
        let hash = short_hash(source);
        let mut element = Element::new(format!("slide-{hash}"));
        self.renderer.render(&mut element, source);
        if let Some(highlighter) = &self.highlighter {
            highlighter.highlight(&mut element);
        }

        if self.grid.get(x, y).is_some() {
            if let Some(node) = self.tree.slide_mut(x, y) {
                node.replace(element, source.to_string(), hash);
                return;
            }
        }

        self.tree.append_slide(x, element, source.to_string(), hash);
    }

    /// Remove nodes whose coordinate vanished, walking the old grid in
    /// reverse (last slide of the last group first) so removals never shift
    /// an index that is still to be visited. Then adopt the new grid.
    fn prune(&mut self, new_grid: SlideGrid) {
        let old_grid = std::mem::replace(&mut self.grid, new_grid);

        for x in (0..old_grid.group_count()).rev() {
            let slides = old_grid.slide_count(x).unwrap_or(0);
            for y in (0..slides).rev() {
                if self.grid.get(x, y).is_none() && self.tree.remove_slide(x, y) {
                    debug!(group = x, slide = y, "pruned slide");
                }
            }

            if x >= self.grid.group_count() && self.tree.remove_group(x) {
                debug!(group = x, "pruned group");
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
