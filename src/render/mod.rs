//! Per-slide markdown rendering.
//!
//! Rendering is deliberately decoupled from reconciliation: the reconciler
//! only requires something that can turn one slide's markdown into markup
//! attached to a given element ([`SlideRenderer`]), and optionally
//! something that marks code blocks for client-side syntax highlighting
//! ([`Highlighter`]). Both are pure with respect to reconciler state.

mod highlight;
mod html;

pub use highlight::{CodeBlockMarker, Highlighter, HIGHLIGHTED_CLASS};
pub use html::HtmlRenderer;

use crate::deck::Element;

/// Converts one slide's markdown into markup attached to a container
/// element. No side effects beyond the given element.
pub trait SlideRenderer: Send {
    /// Render `source` into `element`, replacing its markup.
    fn render(&self, element: &mut Element, source: &str);
}
