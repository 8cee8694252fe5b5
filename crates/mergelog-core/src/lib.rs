//! Mergelog Core - Core library for changelog generation
//!
//! This crate provides the foundational types, error handling, configuration,
//! the version segmentation state machine and the commit message filtering
//! rules for the mergelog tool. It performs no I/O; external collaborators
//! (git, the changelog file, markdown stripping) live behind narrow seams in
//! the sibling crates.

pub mod config;
pub mod error;
pub mod message;
pub mod record;
pub mod segment;
pub mod version;

pub use config::{load_config_or_default, Config};
pub use error::{ChangelogError, ConfigError, HistoryError, MergelogError, Result};
pub use message::{FilteredMessage, MessageFilter, TextSanitizer};
pub use record::{CommitRecord, ResolvedMessage, VersionBucket, VersionLog};
pub use segment::{SegmentStep, Segmenter};
pub use version::Version;
