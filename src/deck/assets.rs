//! Injected script and stylesheet reconciliation.
//!
//! Front matter can request extra `js`/`css` assets for the deck page.
//! Each injected element gets a stable identifier derived from a hash of
//! its URL, so re-injection is idempotent and removal is precise.
//!
//! Scripts and stylesheets follow different policies:
//!
//! - **scripts accumulate**: once executed, a script cannot be unloaded, so
//!   script elements are never removed even when the URL disappears from
//!   the header
//! - **stylesheets sync**: styles are fully reversible, so stylesheet
//!   elements are added and removed to exactly match the header's list

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

/// Stable short hash of a string, used for asset and slide element ids.
pub fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    hex::encode(&digest[..6])
}

/// An injected asset element: its id attribute and source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetElement {
    /// Element id attribute (`script-<hash>` or `css-<hash>`)
    pub id: String,

    /// The asset URL
    pub url: String,
}

/// Result of a stylesheet reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDiff {
    /// Stylesheets injected by this pass
    pub injected: Vec<AssetElement>,

    /// Element ids removed because their URL left the header
    pub removed: Vec<String>,
}

/// The set of currently injected script and stylesheet elements.
#[derive(Debug, Clone, Default)]
pub struct InjectedAssets {
    scripts: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
}

impl InjectedAssets {
    /// Create an empty asset set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Element id for a script URL.
    pub fn script_id(url: &str) -> String {
        format!("script-{}", short_hash(url))
    }

    /// Element id for a stylesheet URL.
    pub fn style_id(url: &str) -> String {
        format!("css-{}", short_hash(url))
    }

    /// Inject any script URL not yet present. Returns the newly injected
    /// elements. Scripts are never removed.
    pub fn reconcile_scripts(&mut self, urls: &[String]) -> Vec<AssetElement> {
        let mut injected = Vec::new();
        for url in urls {
            let id = Self::script_id(url);
            if !self.scripts.contains_key(&id) {
                self.scripts.insert(id.clone(), url.clone());
                injected.push(AssetElement {
                    id,
                    url: url.clone(),
                });
            }
        }
        injected
    }

    /// Sync stylesheet elements to exactly the given URL list: inject the
    /// missing ones, remove the ones whose URL is no longer listed.
    pub fn reconcile_styles(&mut self, urls: &[String]) -> StyleDiff {
        let mut diff = StyleDiff::default();
        let mut wanted = Vec::with_capacity(urls.len());

        for url in urls {
            let id = Self::style_id(url);
            if !self.styles.contains_key(&id) {
                self.styles.insert(id.clone(), url.clone());
                diff.injected.push(AssetElement {
                    id: id.clone(),
                    url: url.clone(),
                });
            }
            wanted.push(id);
        }

        let stale: Vec<String> = self
            .styles
            .keys()
            .filter(|id| !wanted.contains(id))
            .cloned()
            .collect();
        for id in stale {
            self.styles.remove(&id);
            diff.removed.push(id);
        }

        diff
    }

    /// Currently present script elements, ordered by id.
    pub fn scripts(&self) -> impl Iterator<Item = AssetElement> + '_ {
        self.scripts.iter().map(|(id, url)| AssetElement {
            id: id.clone(),
            url: url.clone(),
        })
    }

    /// Currently present stylesheet elements, ordered by id.
    pub fn styles(&self) -> impl Iterator<Item = AssetElement> + '_ {
        self.styles.iter().map(|(id, url)| AssetElement {
            id: id.clone(),
            url: url.clone(),
        })
    }

    /// Whether a script element with this id is present.
    pub fn has_script(&self, id: &str) -> bool {
        self.scripts.contains_key(id)
    }

    /// Whether a stylesheet element with this id is present.
    pub fn has_style(&self, id: &str) -> bool {
        self.styles.contains_key(id)
    }
}

// =============================================================================
// Tests
// =============================================================================
