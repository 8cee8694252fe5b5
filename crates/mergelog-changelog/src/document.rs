//! Existing changelog splitting and merging

use tracing::debug;

use mergelog_core::version::Version;

/// An existing changelog split around its most recent version line
///
/// The first line whose trimmed content is exactly a version string marks the
/// resume point: everything above it is a hand-written header to preserve,
/// everything from it onward is the already-recorded history. A document
/// without such a line is all header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    header: String,
    version: Option<Version>,
    tail: String,
}

impl ChangelogDocument {
    /// Split raw changelog content
    pub fn parse(content: &str) -> Self {
        let mut offset = 0;

        for line in content.split_inclusive('\n') {
            if let Some(version) = Version::parse(line.trim()) {
                debug!(version = %version, "found most recent recorded version");
                return Self {
                    header: content[..offset].to_string(),
                    version: Some(version),
                    tail: content[offset..].to_string(),
                };
            }
            offset += line.len();
        }

        Self {
            header: content.to_string(),
            version: None,
            tail: String::new(),
        }
    }

    /// The most recent version already recorded, if any
    pub fn known_version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// Insert newly rendered blocks between the header and the recorded tail
    pub fn merge(&self, new_blocks: &str) -> String {
        format!("{}{}{}", self.header, new_blocks, self.tail)
    }
}
