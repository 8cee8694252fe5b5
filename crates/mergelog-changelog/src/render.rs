//! Changelog block rendering

use mergelog_core::record::VersionLog;
use mergelog_core::version::Version;

/// Render version logs as changelog blocks.
///
/// Each block is the version string, an underline of `=` of the same length,
/// one ` * ` bullet per message, and a trailing blank line. A log matching
/// `skip` is excluded; the history reader already stops at the known version,
/// this guards the output a second time.
pub fn render_blocks(logs: &[VersionLog], skip: Option<&Version>) -> String {
    let mut output = String::new();

    for log in logs {
        if skip == Some(&log.version) {
            continue;
        }

        let title = log.version.as_str();
        output.push_str(title);
        output.push('\n');
        output.push_str(&"=".repeat(title.len()));
        output.push('\n');

        for message in &log.messages {
            output.push_str(&format!(" * {}\n", message));
        }

        output.push('\n');
    }

    output
}
