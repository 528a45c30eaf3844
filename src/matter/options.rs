//! Deck header options parsed from front matter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Theme applied when the header does not name one.
pub const DEFAULT_THEME: &str = "white";

/// Options carried in a document's front matter.
///
/// The deck interprets four keys; everything else is preserved in
/// [`passthrough`](Self::passthrough) and forwarded verbatim to the
/// presentation engine. The passthrough map is a `BTreeMap`, so two headers
/// that differ only in key order compare equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckOptions {
    /// Theme name (stylesheet selected in the deck shell)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Page title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Extra script URLs to inject into the deck page
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub js: Vec<String>,

    /// Extra stylesheet URLs to inject into the deck page
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css: Vec<String>,

    /// All remaining keys, passed through to the presentation engine
    #[serde(flatten)]
    pub passthrough: BTreeMap<String, serde_yaml::Value>,
}

impl DeckOptions {
    /// The effective theme, falling back to [`DEFAULT_THEME`].
    pub fn theme(&self) -> &str {
        self.theme.as_deref().unwrap_or(DEFAULT_THEME)
    }

    /// The effective title, falling back to the empty string.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// True when no key at all was present.
    pub fn is_empty(&self) -> bool {
        self.theme.is_none()
            && self.title.is_none()
            && self.js.is_empty()
            && self.css.is_empty()
            && self.passthrough.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
