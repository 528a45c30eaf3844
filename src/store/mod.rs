//! Document and media persistence.
//!
//! Storage is a thin key-value layer over the filesystem, matching the
//! editor's needs: one markdown document plus uploaded media files, all
//! under a single data directory.
//!
//! The document store is a trait ([`ContentStore`]) so the HTTP layer can
//! be exercised against an in-memory implementation in tests; the
//! filesystem implementation is [`FsContentStore`].

mod content;
mod media;

pub use content::{ContentStore, FsContentStore, DEFAULT_DOCUMENT_KEY};
pub use media::{MediaStore, StoredMedia, BROWSER_DEFAULT_NAME};
