//! Splitting a raw document into front matter and body.

use tracing::warn;

use super::options::DeckOptions;

/// A document split into its header and markdown body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Parsed front-matter options (empty when absent or malformed)
    pub header: DeckOptions,

    /// Markdown body after front-matter removal
    pub content: String,
}

/// Split a raw document into `{header, content}`.
///
/// A front-matter block is a leading line of `---`, YAML content, and a
/// closing `---` line. Absent or malformed front matter is a recoverable
/// condition, never an error:
///
/// - no opening delimiter: empty header, content is the input unchanged
/// - opening delimiter but no closing one: same fallback
/// - delimiters present but invalid YAML: empty header, content is the body
///   after the closing delimiter
pub fn parse(raw: &str) -> Document {
    if !raw.starts_with("---") {
        return Document {
            header: DeckOptions::default(),
            content: raw.to_string(),
        };
    }

    // Skip past the opening delimiter line.
    let after_open = match raw[3..].find('\n') {
        Some(pos) => &raw[3 + pos + 1..],
        None => {
            return Document {
                header: DeckOptions::default(),
                content: raw.to_string(),
            }
        }
    };

    // Locate the closing delimiter. An empty block is `---` immediately
    // followed by `---`.
    let (yaml, after_close) = if let Some(rest) = after_open.strip_prefix("---") {
        ("", rest)
    } else if let Some(pos) = after_open.find("\n---") {
        (&after_open[..pos], &after_open[pos + 4..])
    } else {
        warn!("front-matter opening delimiter without a closing one");
        return Document {
            header: DeckOptions::default(),
            content: raw.to_string(),
        };
    };

    let body = after_close.strip_prefix('\n').unwrap_or(after_close);

    if yaml.trim().is_empty() {
        return Document {
            header: DeckOptions::default(),
            content: body.to_string(),
        };
    }

    match serde_yaml::from_str::<DeckOptions>(yaml) {
        Ok(header) => Document {
            header,
            content: body.to_string(),
        },
        Err(e) => {
            warn!("malformed front matter ignored: {e}");
            Document {
                header: DeckOptions::default(),
                content: body.to_string(),
            }
        }
    }
}

/// Re-serialize a header and body into a raw document.
///
/// The output round-trips through [`parse`]: the reparsed header is
/// structurally equal to `header` (key order aside) and the reparsed
/// content is identical to `content`. An empty header serializes to the
/// body alone.
pub fn serialize(header: &DeckOptions, content: &str) -> String {
    if header.is_empty() {
        return content.to_string();
    }

    // serde_yaml output always ends with a newline.
    let yaml = serde_yaml::to_string(header).unwrap_or_default();
    format!("---\n{yaml}---\n{content}")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_front_matter() {
        let raw = "---\ntheme: black\ntitle: Demo\n---\n# Hello";
        let doc = parse(raw);
        assert_eq!(doc.header.theme(), "black");
        assert_eq!(doc.header.title(), "Demo");
        assert_eq!(doc.content, "# Hello");
    }

    #[test]
    fn test_parse_without_front_matter() {
        let raw = "# Just markdown\n\nNo header here.";
        let doc = parse(raw);
        assert!(doc.header.is_empty());
        assert_eq!(doc.content, raw);
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = parse("");
        assert!(doc.header.is_empty());
        assert_eq!(doc.content, "");
    }

    #[test]
    fn test_parse_empty_front_matter() {
        let doc = parse("---\n---\nBody");
        assert!(doc.header.is_empty());
        assert_eq!(doc.content, "Body");
    }

    #[test]
    fn test_parse_unclosed_front_matter_falls_back() {
        let raw = "---\ntheme: black\n\nNo closing delimiter";
        let doc = parse(raw);
        assert!(doc.header.is_empty());
        assert_eq!(doc.content, raw);
    }

    #[test]
    fn test_parse_malformed_yaml_falls_back() {
        let raw = "---\n{{not: yaml: at all}}\n---\nBody";
        let doc = parse(raw);
        assert!(doc.header.is_empty());
        assert_eq!(doc.content, "Body");
    }

    #[test]
    fn test_parse_only_opening_delimiter() {
        let doc = parse("---");
        assert!(doc.header.is_empty());
        assert_eq!(doc.content, "---");
    }

    #[test]
    fn test_parse_dashes_inside_body() {
        let raw = "---\ntitle: T\n---\nBody with --- dashes";
        let doc = parse(raw);
        assert_eq!(doc.header.title(), "T");
        assert!(doc.content.contains("--- dashes"));
    }

    #[test]
    fn test_parse_lists() {
        let raw = "---\njs:\n  - x.js\n  - y.js\ncss:\n  - z.css\n---\nBody";
        let doc = parse(raw);
        assert_eq!(doc.header.js, vec!["x.js", "y.js"]);
        assert_eq!(doc.header.css, vec!["z.css"]);
    }

    #[test]
    fn test_round_trip_preserves_header_and_content() {
        let raw = "---\ntheme: sky\ntransition: fade\ncontrols: false\njs:\n  - a.js\n---\n# Slide\n\ntext\n";
        let first = parse(raw);
        let reserialized = serialize(&first.header, &first.content);
        let second = parse(&reserialized);
        assert_eq!(first.header, second.header);
        assert_eq!(first.content, second.content);
    }

    #[test]
    fn test_round_trip_without_header() {
        let raw = "# No header\n";
        let first = parse(raw);
        let reserialized = serialize(&first.header, &first.content);
        assert_eq!(reserialized, raw);
    }

    #[test]
    fn test_parse_unicode() {
        let raw = "---\ntitle: 発表\n---\n本文";
        let doc = parse(raw);
        assert_eq!(doc.header.title(), "発表");
        assert_eq!(doc.content, "本文");
    }
}
