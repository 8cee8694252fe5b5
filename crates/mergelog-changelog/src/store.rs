//! Changelog file access

use std::path::Path;

use tracing::{debug, info};

use mergelog_core::error::ChangelogError;

/// Read the changelog file; an absent file is an empty changelog, not an error
pub fn read_changelog(path: &Path) -> Result<String, ChangelogError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "read changelog");
            Ok(content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no existing changelog");
            Ok(String::new())
        }
        Err(source) => Err(ChangelogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Overwrite the changelog file with the full merged document
pub fn write_changelog(path: &Path, content: &str) -> Result<(), ChangelogError> {
    std::fs::write(path, content).map_err(|source| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), bytes = content.len(), "changelog written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_file_reads_empty() {
        let temp = TempDir::new().unwrap();
        let content = read_changelog(&temp.path().join("CHANGELOG.md")).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");

        write_changelog(&path, "1.0.0\n=====\n * change\n\n").unwrap();
        assert_eq!(read_changelog(&path).unwrap(), "1.0.0\n=====\n * change\n\n");
    }

    #[test]
    fn test_unreadable_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        // Reading a directory as a file fails with something other than NotFound.
        let result = read_changelog(temp.path());
        assert!(result.is_err());
    }
}
