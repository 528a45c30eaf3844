//! Idempotent code-block marking for client-side syntax highlighting.

use regex::{Captures, Regex};

use crate::deck::Element;

/// Class marking a code block as already processed by the highlighter.
pub const HIGHLIGHTED_CLASS: &str = "hljs";

/// Applies a highlighting pass to rendered slide markup.
pub trait Highlighter: Send {
    /// Process any unhighlighted code blocks in the element. Must be
    /// idempotent: blocks already processed are skipped.
    fn highlight(&self, element: &mut Element);
}

/// Marks `<pre><code>` blocks with the [`HIGHLIGHTED_CLASS`] so the
/// client-side highlighter picks them up exactly once.
///
/// The actual coloring happens in the browser; the marker's job is the
/// `not-already-highlighted` gate.
#[derive(Debug, Clone)]
pub struct CodeBlockMarker {
    opening: Regex,
}

impl CodeBlockMarker {
    /// Create a marker.
    pub fn new() -> Self {
        // Matches the opening of a fenced code block as emitted by the
        // renderer, with or without a language class.
        let opening = Regex::new(r#"<pre><code(?: class="([^"]*)")?>"#)
            .expect("static pattern");
        Self { opening }
    }
}

impl Default for CodeBlockMarker {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for CodeBlockMarker {
    fn highlight(&self, element: &mut Element) {
        let marked = self
            .opening
            .replace_all(element.html(), |caps: &Captures<'_>| match caps.get(1) {
                Some(classes)
                    if classes
                        .as_str()
                        .split_whitespace()
                        .any(|c| c == HIGHLIGHTED_CLASS) =>
                {
                    caps[0].to_string()
                }
                Some(classes) => format!(
                    r#"<pre><code class="{} {HIGHLIGHTED_CLASS}">"#,
                    classes.as_str()
                ),
                None => format!(r#"<pre><code class="{HIGHLIGHTED_CLASS}">"#),
            });

        if marked != element.html() {
            let marked = marked.into_owned();
            element.set_html(marked);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
