//! Markdown stripping

use pulldown_cmark::{Event, Parser, TagEnd};

use mergelog_core::message::TextSanitizer;

/// Strips markdown syntax, keeping plain text
///
/// The event stream is flattened: text and code content is kept, soft and
/// hard breaks become newlines, block ends become newlines, all other markup
/// (emphasis markers, link targets, heading hashes) is discarded.
#[derive(Debug, Default)]
pub struct MarkdownSanitizer;

impl MarkdownSanitizer {
    /// Create a new sanitizer
    pub fn new() -> Self {
        Self
    }
}

impl TextSanitizer for MarkdownSanitizer {
    fn sanitize(&self, text: &str) -> String {
        let mut output = String::new();

        for event in Parser::new(text) {
            match event {
                Event::Text(t) | Event::Code(t) => output.push_str(&t),
                Event::SoftBreak | Event::HardBreak => output.push('\n'),
                Event::End(TagEnd::Paragraph)
                | Event::End(TagEnd::Heading(_))
                | Event::End(TagEnd::Item) => {
                    if !output.ends_with('\n') {
                        output.push('\n');
                    }
                }
                _ => {}
            }
        }

        output.trim_end().to_string()
    }
}
