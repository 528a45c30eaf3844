//! Deck page module - renders the presentation shell around the live tree.

use crate::deck::{DeckState, DeckTree, InjectedAssets};

/// Default CDN base for the presentation runtime's own assets.
pub const DEFAULT_ASSET_BASE: &str = "https://cdn.jsdelivr.net/npm/reveal.js@3.9.2/";

/// Escape HTML special characters to prevent XSS attacks.
fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render the full deck page: runtime assets, theme stylesheet, injected
/// custom assets, and the current presentation tree as nested sections.
///
/// # Arguments
///
/// * `state` - Current presentation state (theme, title)
/// * `tree` - The live presentation tree
/// * `assets` - Currently injected custom scripts/stylesheets
/// * `asset_base` - Base URL for the presentation runtime's own assets
pub fn render_deck_page(
    state: &DeckState,
    tree: &DeckTree,
    assets: &InjectedAssets,
    asset_base: &str,
) -> String {
    let base = asset_base.trim_end_matches('/');
    let title = html_escape(state.title());
    let theme = html_escape(state.theme());

    let mut custom_css = String::new();
    for asset in assets.styles() {
        custom_css.push_str(&format!(
            "    <link rel=\"stylesheet\" id=\"{}\" class=\"deck-custom-css\" href=\"{}\">\n",
            html_escape(&asset.id),
            html_escape(&asset.url)
        ));
    }

    let mut custom_js = String::new();
    for asset in assets.scripts() {
        custom_js.push_str(&format!(
            "    <script id=\"{}\" class=\"deck-custom-js\" src=\"{}\" async></script>\n",
            html_escape(&asset.id),
            html_escape(&asset.url)
        ));
    }

    let mut sections = String::new();
    for group in tree.groups() {
        sections.push_str("            <section>\n");
        for slide in group.slides() {
            sections.push_str(&format!(
                "                <section id=\"{}\">{}</section>\n",
                html_escape(slide.element().id()),
                slide.element().html()
            ));
        }
        sections.push_str("            </section>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{base}/css/reveal.css" type="text/css">
    <link rel="stylesheet" id="deck-theme" href="{base}/css/theme/{theme}.css" type="text/css">
{custom_css}</head>
<body>
    <div class="reveal">
        <div class="slides">
{sections}        </div>
    </div>
    <script src="{base}/js/reveal.min.js"></script>
    <script src="{base}/plugin/highlight/highlight.js" async></script>
{custom_js}</body>
</html>
"#
    )
}

// =============================================================================
// Tests
// =============================================================================
