//! Conversion of doc comment text to Markdown.

mod blocks;
mod emphasis;

use std::collections::HashMap;

pub use blocks::{Block, BlockKind, CodeLang, blocks};
pub use emphasis::emphasize;

/// Options for [`to_markdown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Identifiers to emphasize, mapped to a link target or to an empty
    /// string for italics only.
    pub words: HashMap<String, String>,
    /// Tag code blocks containing `+`/`-` lines as `diff`.
    pub diff_blocks: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            words: HashMap::new(),
            diff_blocks: true,
        }
    }
}

impl MarkdownOptions {
    pub fn with_diff_blocks(mut self, enabled: bool) -> Self {
        self.diff_blocks = enabled;
        self
    }

    pub fn with_word(mut self, word: impl Into<String>, url: impl Into<String>) -> Self {
        self.words.insert(word.into(), url.into());
        self
    }
}

/// Converts comment text to Markdown.
///
/// Paragraph lines are emphasized and followed by a blank line, headings
/// become `####` headings and code blocks are fenced. Code is copied
/// verbatim.
pub fn to_markdown(text: &str, options: &MarkdownOptions) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    write_markdown(&mut out, text, options);
    out
}

/// Appends the Markdown for `text` to `out`.
pub fn write_markdown(out: &mut String, text: &str, options: &MarkdownOptions) {
    let words = (!options.words.is_empty()).then_some(&options.words);

    for block in blocks(text, options.diff_blocks) {
        match block.kind {
            BlockKind::Paragraph => {
                for line in &block.lines {
                    out.push_str(&emphasize(line, words));
                }
                out.push('\n');
            }
            BlockKind::Heading => {
                for line in &block.lines {
                    out.push_str("#### ");
                    out.push_str(line);
                    out.push_str("\n\n");
                }
            }
            BlockKind::Preformatted(lang) => {
                out.push_str("```");
                out.push_str(lang.as_str());
                out.push('\n');
                for line in &block.lines {
                    out.push_str(line);
                    if !line.ends_with('\n') {
                        out.push('\n');
                    }
                }
                out.push_str("```\n\n");
            }
        }
    }
}
