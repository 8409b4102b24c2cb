//! Classification of comment text into paragraphs, headings and code blocks.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Language tag of a preformatted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLang {
    Go,
    Diff,
}

impl CodeLang {
    /// Fence info string for the language.
    pub fn as_str(self) -> &'static str {
        match self {
            CodeLang::Go => "go",
            CodeLang::Diff => "diff",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Preformatted(CodeLang),
}

/// A classified span of comment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Block content. Paragraph and code lines keep their line terminator;
    /// a heading holds its trimmed text only.
    pub lines: Vec<String>,
    /// Source lines owned by this block, including the blank lines that
    /// separate it from the next block.
    pub span: Range<usize>,
}

impl Block {
    fn new(kind: BlockKind, lines: Vec<String>, start: usize) -> Self {
        Self {
            kind,
            lines,
            span: start..start,
        }
    }
}

/// Splits comment text into blocks.
///
/// The text is expected without comment markers, without leading or trailing
/// blank lines and without trailing spaces. Each span of unindented non-blank
/// lines becomes a paragraph, except for a single line that sits between blank
/// lines, is followed by more unindented text and looks like a title: that one
/// becomes a heading. A span of indented lines becomes a preformatted block with
/// the common indentation removed, tagged as a diff when `detect_diff` is set
/// and one of its lines starts with `+` or `-`.
pub fn blocks(text: &str, detect_diff: bool) -> Vec<Block> {
    let mut lines: Vec<&str> = text.split_inclusive('\n').collect();
    unindent(&mut lines);

    let mut out = BlockList::default();
    let mut last_was_blank = false;
    let mut last_was_heading = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if is_blank(line) {
            out.close_paragraph();
            i += 1;
            last_was_blank = true;
            continue;
        }

        if indent_len(line) > 0 {
            out.close_paragraph();

            let mut j = i + 1;
            while j < lines.len() && (is_blank(lines[j]) || indent_len(lines[j]) > 0) {
                j += 1;
            }
            // trailing blank lines are not part of the code
            while j > i && is_blank(lines[j - 1]) {
                j -= 1;
            }

            let mut pre = lines[i..j].to_vec();
            let lang = if detect_diff && pre.iter().any(|line| is_diff_line(line)) {
                CodeLang::Diff
            } else {
                CodeLang::Go
            };
            unindent(&mut pre);
            out.push(Block::new(
                BlockKind::Preformatted(lang),
                pre.into_iter().map(str::to_string).collect(),
                i,
            ));

            i = j;
            last_was_heading = false;
            continue;
        }

        if last_was_blank
            && !last_was_heading
            && i + 2 < lines.len()
            && is_blank(lines[i + 1])
            && !is_blank(lines[i + 2])
            && indent_len(lines[i + 2]) == 0
        {
            if let Some(head) = heading(line) {
                out.close_paragraph();
                out.push(Block::new(BlockKind::Heading, vec![head.to_string()], i));
                i += 2;
                last_was_heading = true;
                continue;
            }
        }

        last_was_blank = false;
        last_was_heading = false;
        out.append_line(i, line);
        i += 1;
    }

    out.finish(lines.len())
}

/// Accumulates blocks and the currently open paragraph.
#[derive(Default)]
struct BlockList {
    blocks: Vec<Block>,
    paragraph: Option<Block>,
}

impl BlockList {
    fn close_paragraph(&mut self) {
        if let Some(paragraph) = self.paragraph.take() {
            self.blocks.push(paragraph);
        }
    }

    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn append_line(&mut self, index: usize, line: &str) {
        self.paragraph
            .get_or_insert_with(|| Block::new(BlockKind::Paragraph, Vec::new(), index))
            .lines
            .push(line.to_string());
    }

    /// Closes the open paragraph and stretches every span up to the start of
    /// the next block so the spans tile `0..line_count`.
    fn finish(mut self, line_count: usize) -> Vec<Block> {
        self.close_paragraph();
        let mut blocks = self.blocks;

        let starts: Vec<usize> = blocks.iter().map(|block| block.span.start).collect();
        for (index, block) in blocks.iter_mut().enumerate() {
            let start = if index == 0 { 0 } else { starts[index] };
            let end = starts.get(index + 1).copied().unwrap_or(line_count);
            block.span = start..end;
        }
        blocks
    }
}

fn is_blank(line: &str) -> bool {
    line.is_empty() || line == "\n"
}

fn indent_len(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ' || b == b'\t').count()
}

fn is_diff_line(line: &str) -> bool {
    matches!(line.as_bytes().get(indent_len(line)), Some(b'+' | b'-'))
}

/// Removes the longest whitespace prefix shared by all non-blank lines.
fn unindent(lines: &mut [&str]) {
    let mut non_blank = lines.iter().filter(|line| !is_blank(line));
    let Some(first) = non_blank.next() else {
        return;
    };

    let mut prefix = &first[..indent_len(first)];
    for line in non_blank {
        prefix = common_prefix(prefix, &line[..indent_len(line)]);
    }

    let n = prefix.len();
    if n == 0 {
        return;
    }
    for line in lines.iter_mut().filter(|line| !is_blank(line)) {
        *line = &line[n..];
    }
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

/// Characters that never appear in a heading. `(`, `)` and `,` are allowed.
const NON_HEADING_CHARS: &str = ";:!?+*/=[]{}_^°&§~%#@<\">\\";

/// Upper case letter first, letter or decimal digit last. Letter-like
/// symbols (`Ⓐ`) and other numerics (`½`) are not letters or digits.
static HEADING_EDGES_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\p{Lu}(?s:.*[\p{L}\p{Nd}])?$").expect("heading pattern is valid")
});

/// Returns the trimmed line if it passes as a section heading.
pub(crate) fn heading(line: &str) -> Option<&str> {
    let line = line.trim();

    if !HEADING_EDGES_RX.is_match(line) {
        return None;
    }

    if line.contains(|c| NON_HEADING_CHARS.contains(c)) {
        return None;
    }

    // "'" only as possessive "'s"
    let mut rest = line.as_bytes();
    while let Some(i) = rest.iter().position(|&b| b == b'\'') {
        if rest.get(i + 1) != Some(&b's') || rest.get(i + 2).is_some_and(|&b| b != b' ') {
            return None;
        }
        rest = &rest[i + 2..];
    }

    // "." only when followed by a non-space
    let mut rest = line.as_bytes();
    while let Some(i) = rest.iter().position(|&b| b == b'.') {
        if matches!(rest.get(i + 1), None | Some(b' ')) {
            return None;
        }
        rest = &rest[i + 1..];
    }

    Some(line)
}
