//! Page-metadata scraping for link previews.
//!
//! The editor lets authors paste a URL and get a preview card; this module
//! fetches the page and extracts the usual Open Graph / standard meta tags.
//! Results are cached in an LRU keyed by URL, since editors tend to
//! re-request the same link while typing around it.

use std::num::NonZeroUsize;

use lru::LruCache;
use regex::Regex;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::error::MetadataError;

/// Default number of cached metadata entries.
pub const DEFAULT_METADATA_CACHE_CAPACITY: usize = 256;

/// Timeout for fetching a page.
const FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

// =============================================================================
// Metadata Model
// =============================================================================

/// Metadata extracted from a web page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageMetadata {
    /// Page title (Open Graph first, `<title>` as fallback)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Preview image URL, resolved against the page URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Favicon URL (defaults to `/favicon.ico` on the page's origin)
    pub icon: String,

    /// Keywords from the `keywords` meta tag
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    /// Document language from the `<html lang>` attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Open Graph object type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// The page URL the metadata was extracted from
    pub url: String,

    /// Site provider name derived from the host
    pub provider: String,
}

// =============================================================================
// Scraper
// =============================================================================

/// Fetches pages and extracts their metadata, with an LRU cache by URL.
pub struct MetadataScraper {
    client: reqwest::Client,
    cache: Mutex<LruCache<String, PageMetadata>>,
    extractor: Extractor,
}

impl MetadataScraper {
    /// Create a scraper with the default cache capacity.
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_METADATA_CACHE_CAPACITY)
    }

    /// Create a scraper with a custom cache capacity.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap();
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
            cache: Mutex::new(LruCache::new(capacity)),
            extractor: Extractor::new(),
        }
    }

    /// Fetch `url` and extract its metadata, serving repeats from cache.
    pub async fn scrape(&self, url: &str) -> Result<PageMetadata, MetadataError> {
        let parsed = Url::parse(url).map_err(|e| MetadataError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(MetadataError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        if let Some(cached) = self.cache.lock().await.get(url) {
            debug!(url, "metadata cache hit");
            return Ok(cached.clone());
        }

        let body = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .map_err(|e| MetadataError::Fetch(e.to_string()))?
            .text()
            .await
            .map_err(|e| MetadataError::Fetch(e.to_string()))?;

        let metadata = self.extractor.extract(&body, &parsed);
        self.cache
            .lock()
            .await
            .put(url.to_string(), metadata.clone());
        Ok(metadata)
    }

    /// Extract metadata from already-fetched HTML. Exposed for tests.
    pub fn extract(&self, html: &str, url: &Url) -> PageMetadata {
        self.extractor.extract(html, url)
    }
}

impl Default for MetadataScraper {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Regex-based meta tag extraction.
struct Extractor {
    meta_tag: Regex,
    attr: Regex,
    title_tag: Regex,
    html_lang: Regex,
    icon_link: Regex,
}

impl Extractor {
    fn new() -> Self {
        Self {
            meta_tag: Regex::new(r"(?is)<meta\s+[^>]*>").expect("static pattern"),
            attr: Regex::new(r#"(?i)([a-z-]+)\s*=\s*["']([^"']*)["']"#).expect("static pattern"),
            title_tag: Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("static pattern"),
            html_lang: Regex::new(r#"(?is)<html[^>]*\slang\s*=\s*["']([^"']+)["']"#)
                .expect("static pattern"),
            icon_link: Regex::new(r"(?is)<link\s+[^>]*>").expect("static pattern"),
        }
    }

    fn extract(&self, html: &str, url: &Url) -> PageMetadata {
        let mut meta: Vec<(String, String)> = Vec::new();
        for tag in self.meta_tag.find_iter(html) {
            let mut name = None;
            let mut content = None;
            for caps in self.attr.captures_iter(tag.as_str()) {
                let key = caps[1].to_lowercase();
                match key.as_str() {
                    "name" | "property" => name = Some(caps[2].to_string()),
                    "content" => content = Some(caps[2].to_string()),
                    _ => {}
                }
            }
            if let (Some(name), Some(content)) = (name, content) {
                meta.push((name.to_lowercase(), content));
            }
        }

        let get = |key: &str| {
            meta.iter()
                .find(|(name, _)| name == key)
                .map(|(_, content)| content.trim().to_string())
                .filter(|c| !c.is_empty())
        };

        let title = get("og:title")
            .or_else(|| get("twitter:title"))
            .or_else(|| self.page_title(html));
        let description = get("og:description").or_else(|| get("description"));
        let image = get("og:image")
            .or_else(|| get("twitter:image"))
            .and_then(|src| url.join(&src).ok())
            .map(|u| u.to_string());
        let keywords = get("keywords")
            .map(|list| {
                list.split(',')
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let language = self
            .html_lang
            .captures(html)
            .map(|caps| caps[1].to_string());

        PageMetadata {
            title,
            description,
            image,
            icon: self.icon(html, url),
            keywords,
            language,
            kind: get("og:type"),
            url: url.to_string(),
            provider: provider_name(url),
        }
    }

    fn page_title(&self, html: &str) -> Option<String> {
        self.title_tag
            .captures(html)
            .map(|caps| caps[1].split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|t| !t.is_empty())
    }

    fn icon(&self, html: &str, url: &Url) -> String {
        for tag in self.icon_link.find_iter(html) {
            let mut rel = None;
            let mut href = None;
            for caps in self.attr.captures_iter(tag.as_str()) {
                match caps[1].to_lowercase().as_str() {
                    "rel" => rel = Some(caps[2].to_lowercase()),
                    "href" => href = Some(caps[2].to_string()),
                    _ => {}
                }
            }
            let is_icon = rel
                .as_deref()
                .is_some_and(|r| r.split_whitespace().any(|part| part == "icon"));
            if is_icon {
                if let Some(resolved) = href.and_then(|h| url.join(&h).ok()) {
                    return resolved.to_string();
                }
            }
        }

        url.join("/favicon.ico")
            .map(|u| u.to_string())
            .unwrap_or_default()
    }
}

/// Provider name from the host, without a leading `www.`.
fn provider_name(url: &Url) -> String {
    url.host_str()
        .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
        .unwrap_or_default()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> PageMetadata {
        let scraper = MetadataScraper::new();
        let url = Url::parse("https://www.example.com/post/1").unwrap();
        scraper.extract(html, &url)
    }

    #[test]
    fn test_open_graph_tags_win() {
        let html = r#"
            <html><head>
            <title>Fallback</title>
            <meta property="og:title" content="OG Title">
            <meta property="og:description" content="OG Desc">
            <meta property="og:type" content="article">
            </head></html>"#;
        let meta = extract(html);
        assert_eq!(meta.title.as_deref(), Some("OG Title"));
        assert_eq!(meta.description.as_deref(), Some("OG Desc"));
        assert_eq!(meta.kind.as_deref(), Some("article"));
    }

    #[test]
    fn test_title_tag_fallback() {
        let html = "<html><head><title>  Plain\n  Title </title></head></html>";
        let meta = extract(html);
        assert_eq!(meta.title.as_deref(), Some("Plain Title"));
    }

    #[test]
    fn test_relative_image_resolved() {
        let html = r#"<meta property="og:image" content="/img/cover.png">"#;
        let meta = extract(html);
        assert_eq!(
            meta.image.as_deref(),
            Some("https://www.example.com/img/cover.png")
        );
    }

    #[test]
    fn test_keywords_split_and_trimmed() {
        let html = r#"<meta name="keywords" content="rust, slides ,markdown,">"#;
        let meta = extract(html);
        assert_eq!(meta.keywords, vec!["rust", "slides", "markdown"]);
    }

    #[test]
    fn test_language_from_html_attribute() {
        let html = r#"<html lang="de"><head></head></html>"#;
        let meta = extract(html);
        assert_eq!(meta.language.as_deref(), Some("de"));
    }

    #[test]
    fn test_icon_link_preferred_over_default() {
        let html = r#"<link rel="shortcut icon" href="/fav.png">"#;
        let meta = extract(html);
        assert_eq!(meta.icon, "https://www.example.com/fav.png");
    }

    #[test]
    fn test_icon_defaults_to_favicon() {
        let meta = extract("<html></html>");
        assert_eq!(meta.icon, "https://www.example.com/favicon.ico");
    }

    #[test]
    fn test_provider_strips_www() {
        let meta = extract("<html></html>");
        assert_eq!(meta.provider, "example.com");
    }

    #[test]
    fn test_empty_content_ignored() {
        let html = r#"<meta property="og:title" content="">"#;
        let meta = extract(html);
        assert_eq!(meta.title, None);
    }

    #[tokio::test]
    async fn test_scrape_rejects_bad_urls() {
        let scraper = MetadataScraper::new();
        assert!(matches!(
            scraper.scrape("not a url").await,
            Err(MetadataError::InvalidUrl(_))
        ));
        assert!(matches!(
            scraper.scrape("ftp://example.com/x").await,
            Err(MetadataError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let meta = PageMetadata {
            kind: Some("article".to_string()),
            url: "https://example.com/".to_string(),
            provider: "example.com".to_string(),
            icon: "https://example.com/favicon.ico".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains(r#""type":"article""#));
        assert!(!json.contains("kind"));
    }
}
