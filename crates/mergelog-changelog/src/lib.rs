//! Mergelog Changelog - rendering and storage
//!
//! Turns resolved version logs into underlined text blocks, splits an
//! existing changelog around its most recent version line, and reads/writes
//! the changelog file.

pub mod document;
pub mod render;
pub mod sanitize;
pub mod store;

pub use document::ChangelogDocument;
pub use render::render_blocks;
pub use sanitize::MarkdownSanitizer;
pub use store::{read_changelog, write_changelog};
