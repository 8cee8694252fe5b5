//! Commit message filtering

use std::sync::LazyLock;

use regex::Regex;

/// Start of a merge-conflict section; everything from here on is noise
static CONFLICTS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(#\s*)?conflicts:").expect("Invalid regex"));

/// Administrative `Merge branch ...` boilerplate
static MERGE_BRANCH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^merge (remote-tracking )?branch .*").expect("Invalid regex"));

/// GitLab merge-request trailer, e.g. `See merge request !42`
static MERGE_REQUEST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^see merge request !.*").expect("Invalid regex"));

/// A raw commit message reduced to its human-readable lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredMessage {
    /// Retained lines in original order, whitespace-trimmed
    pub lines: Vec<String>,
    /// Whether the message carried a merge-request trailer
    pub is_merge_request: bool,
}

impl FilteredMessage {
    /// Join the retained lines, or take only the first one in short mode
    pub fn into_text(self, short: bool) -> String {
        if short {
            self.lines.into_iter().next().unwrap_or_default()
        } else {
            self.lines.join("\n")
        }
    }
}

/// Line-by-line filter for raw commit message bodies
///
/// Rules, applied per line in order: a `Conflicts:` line discards the rest of
/// the message, `Merge branch ...` lines are dropped, `See merge request !...`
/// lines are dropped and mark the message as a merge request, and every other
/// non-empty line is kept trimmed.
#[derive(Debug, Default)]
pub struct MessageFilter;

impl MessageFilter {
    /// Create a new filter
    pub fn new() -> Self {
        Self
    }

    /// Filter a raw commit message body
    pub fn filter(&self, raw: &str) -> FilteredMessage {
        let mut lines = Vec::new();
        let mut is_merge_request = false;

        for line in raw.lines() {
            let trimmed = line.trim();

            if CONFLICTS_REGEX.is_match(trimmed) {
                break;
            }
            if MERGE_BRANCH_REGEX.is_match(trimmed) {
                continue;
            }
            if MERGE_REQUEST_REGEX.is_match(trimmed) {
                is_merge_request = true;
                continue;
            }
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }

        FilteredMessage {
            lines,
            is_merge_request,
        }
    }
}

/// Reduces formatted text to plain text before rendering
///
/// The concrete markdown implementation lives in the changelog crate; core
/// logic only depends on this seam so it can be tested without one.
pub trait TextSanitizer: Send + Sync {
    /// Strip formatting syntax, returning plain text
    fn sanitize(&self, text: &str) -> String;
}

/// Sanitizer that returns text unchanged
#[derive(Debug, Default)]
pub struct PlainSanitizer;

impl TextSanitizer for PlainSanitizer {
    fn sanitize(&self, text: &str) -> String {
        text.to_string()
    }
}
