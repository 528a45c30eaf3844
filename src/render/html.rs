//! Markdown to HTML rendering via pulldown-cmark.

use pulldown_cmark::{html, Options, Parser};

use crate::deck::Element;

use super::SlideRenderer;

/// The production slide renderer: CommonMark plus the extensions slide
/// decks commonly rely on (tables, strikethrough, task lists, footnotes).
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    options: Options,
}

impl HtmlRenderer {
    /// Create a renderer with the default extension set.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        Self { options }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideRenderer for HtmlRenderer {
    fn render(&self, element: &mut Element, source: &str) {
        let parser = Parser::new_ext(source, self.options);
        let mut buf = String::new();
        html::push_html(&mut buf, parser);
        element.set_html(buf);
    }
}

// =============================================================================
// Tests
// =============================================================================
