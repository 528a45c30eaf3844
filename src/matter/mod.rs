//! Front-matter splitter.
//!
//! A deck document is a single markdown file that may begin with a YAML
//! front-matter block:
//!
//! ```text
//! ---
//! theme: black
//! title: My Talk
//! js:
//!   - https://example.com/plugin.js
//! ---
//! # First slide
//! ```
//!
//! [`parse`] splits such a document into a [`DeckOptions`] header and the
//! markdown body. Malformed front matter is never an error: the document
//! degrades to "no header detected" and the body is served as-is.
//!
//! The four keys the deck itself interprets are `theme`, `title`, `js`, and
//! `css`; every other key is preserved opaquely and handed to the
//! presentation engine as configuration.

mod options;
mod splitter;

pub use options::{DeckOptions, DEFAULT_THEME};
pub use splitter::{parse, serialize, Document};
