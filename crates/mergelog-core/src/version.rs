//! Version strings and tag decoration matching

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex for a release version: 2 to 4 dot-separated numeric segments
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+){1,3}$").expect("Invalid regex"));

/// Regex for a tag decoration carrying a version, e.g. `tag: v1.2.3`
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tag:\s*v?(\d+(?:\.\d+){1,3})$").expect("Invalid regex"));

/// A release version of the form `MAJOR.MINOR[.PATCH[.BUILD]]`
///
/// Segments are purely numeric; anything else (pre-release suffixes,
/// single-segment tags, five or more segments) is not a version for
/// changelog purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    raw: String,
    segments: Vec<u64>,
}

impl Version {
    /// Parse a bare version string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if !VERSION_REGEX.is_match(s) {
            return None;
        }

        let segments = s
            .split('.')
            .map(|seg| seg.parse::<u64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .ok()?;

        Some(Self {
            raw: s.to_string(),
            segments,
        })
    }

    /// Extract a version from a single ref decoration (`tag: v1.2.3`)
    pub fn from_tag_decoration(decoration: &str) -> Option<Self> {
        let caps = TAG_REGEX.captures(decoration.trim())?;
        Self::parse(caps.get(1)?.as_str())
    }

    /// Extract a version from a list of decorations; the first decoration
    /// that carries a valid version tag wins.
    pub fn from_decorations<'a, I>(decorations: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        decorations
            .into_iter()
            .find_map(Self::from_tag_decoration)
    }

    /// The version string as written (without any `v` prefix)
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric segments, most significant first
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.segments
            .cmp(&other.segments)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_to_four_segments() {
        assert!(Version::parse("1.0").is_some());
        assert!(Version::parse("1.0.0").is_some());
        assert!(Version::parse("1.0.0.42").is_some());
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(Version::parse("1").is_none());
        assert!(Version::parse("1.0.0.0.0").is_none());
        assert!(Version::parse("1.x.0").is_none());
        assert!(Version::parse("1.0-rc1").is_none());
        assert!(Version::parse("").is_none());
        assert!(Version::parse("version").is_none());
    }

    #[test]
    fn test_from_tag_decoration() {
        assert_eq!(
            Version::from_tag_decoration("tag: v1.2.3").unwrap().as_str(),
            "1.2.3"
        );
        assert_eq!(
            Version::from_tag_decoration("tag: 2.0").unwrap().as_str(),
            "2.0"
        );
        assert!(Version::from_tag_decoration("tag: release-candidate").is_none());
        assert!(Version::from_tag_decoration("origin/main").is_none());
        assert!(Version::from_tag_decoration("HEAD -> main").is_none());
    }

    #[test]
    fn test_first_matching_decoration_wins() {
        let decorations = ["HEAD -> main", "tag: not-a-version", "tag: v1.0.0", "tag: v2.0.0"];
        let version = Version::from_decorations(decorations).unwrap();
        assert_eq!(version.as_str(), "1.0.0");
    }

    #[test]
    fn test_ordering_is_numeric() {
        let a = Version::parse("1.2").unwrap();
        let b = Version::parse("1.10").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_display_preserves_raw() {
        let v = Version::parse("1.0.0.7").unwrap();
        assert_eq!(v.to_string(), "1.0.0.7");
        assert_eq!(v.segments(), &[1, 0, 0, 7]);
    }
}
