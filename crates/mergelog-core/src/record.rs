//! Commit history types

use crate::version::Version;

/// One line of commit history as supplied by the history provider
///
/// Records arrive in reverse-chronological order (newest first) and are
/// immutable once produced. The provider is responsible for exposing the
/// parent count directly; core logic never re-derives it from raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Commit hash (full)
    pub hash: String,
    /// Number of parent commits
    pub parent_count: usize,
    /// Ref decorations pointing at this commit, in provider order
    pub decorations: Vec<String>,
}

impl CommitRecord {
    /// Create a new record
    pub fn new(hash: impl Into<String>, parent_count: usize) -> Self {
        Self {
            hash: hash.into(),
            parent_count,
            decorations: Vec::new(),
        }
    }

    /// Attach ref decorations
    pub fn with_decorations<I, S>(mut self, decorations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decorations = decorations.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this commit integrates a branch (two or more parents)
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }

    /// The version tag attached to this commit, if any
    pub fn version_tag(&self) -> Option<Version> {
        Version::from_decorations(self.decorations.iter().map(String::as_str))
    }
}

/// The commits attributed to a single released version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBucket {
    /// Version the commits belong to
    pub version: Version,
    /// Retained commit hashes, newest first
    pub commits: Vec<String>,
}

impl VersionBucket {
    /// Open a new, empty bucket for a version
    pub fn new(version: Version) -> Self {
        Self {
            version,
            commits: Vec::new(),
        }
    }
}

/// A fully resolved commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
    /// Commit hash the message came from
    pub hash: String,
    /// Filtered, sanitized message text; empty when filtered out
    pub text: String,
    /// Whether the message carried a `See merge request` marker
    pub is_merge_request: bool,
}

impl ResolvedMessage {
    /// Whether anything survived filtering
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Messages for one version, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLog {
    /// Version the messages belong to
    pub version: Version,
    /// Non-empty message texts in original commit order
    pub messages: Vec<String>,
}
