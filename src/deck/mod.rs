//! Slide deck reconciliation.
//!
//! This module maintains a live presentation tree from an edited markdown
//! document. Every document update is diffed against the previous one so
//! that unchanged slides keep their node identity, changed slides are
//! re-rendered in place, and removed slides are pruned.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Reconciler                   │
//! │  update(raw)                            │
//! │  1. split front matter                  │
//! │  2. reconcile header side effects       │
//! │  3. diff slide grid, render in place    │
//! │  4. prune vanished coordinates          │
//! └──────┬─────────────┬────────────┬───────┘
//!        │             │            │
//!        ▼             ▼            ▼
//! ┌────────────┐ ┌───────────┐ ┌──────────────────┐
//! │  DeckTree  │ │ Injected  │ │ PresentationEngine│
//! │ (sections) │ │  Assets   │ │  (capability)     │
//! └────────────┘ └───────────┘ └──────────────────┘
//! ```
//!
//! # Components
//!
//! - [`SlideGrid`]: the target structure, split from the markdown body on
//!   `===` (groups) and `--` (sub-slides) separator lines
//! - [`DeckTree`]: the owned presentation tree with stable node identity
//! - [`InjectedAssets`]: custom script/style elements keyed by URL hash
//! - [`PresentationEngine`]: the five-operation capability surface of the
//!   client-side presentation runtime
//! - [`Reconciler`]: drives all of the above from `update(raw)`

mod assets;
mod engine;
mod grid;
mod reconciler;
mod tree;

pub use assets::{short_hash, AssetElement, InjectedAssets, StyleDiff};
pub use engine::{EngineConfig, LocalEngine, PresentationEngine};
pub use grid::{SlideGrid, GROUP_SEPARATOR, SLIDE_SEPARATOR};
pub use reconciler::{DeckState, Reconciler};
pub use tree::{DeckTree, Element, GroupNode, NodeId, SlideNode};
