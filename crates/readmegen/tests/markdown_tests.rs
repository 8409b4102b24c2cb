use proptest::prelude::*;
use readmegen::markdown::{BlockKind, CodeLang, blocks};
use readmegen::{MarkdownOptions, normalize, to_markdown};

#[test]
fn renders_doc_comment() {
    let doc = "Package pkg1 is a testing package.\n\
               \n\
               Usage\n\
               \n\
               Call it like this (see the docs) https://example.com/docs.\n\
               \n\
               \tpkg1.Run(\"./...\")\n\
               \n\
               Or apply this change:\n\
               \n\
               \t-\told()\n\
               \t+\tnew()\n\
               \n\
               Logo: (image/logo) https://example.com/logo.png";

    let markdown = to_markdown(doc, &MarkdownOptions::default());
    assert_eq!(
        markdown,
        "Package pkg1 is a testing package.\n\n\
         #### Usage\n\n\
         Call it like this [see the docs](https://example.com/docs).\n\n\
         ```go\npkg1.Run(\"./...\")\n```\n\n\
         Or apply this change:\n\n\
         ```diff\n-\told()\n+\tnew()\n```\n\n\
         Logo: ![logo](https://example.com/logo.png)\n\n"
    );
}

#[test]
fn url_followed_by_period_keeps_period_outside() {
    let markdown = to_markdown(
        "See https://example.com/page. And more.",
        &MarkdownOptions::default(),
    );
    assert_eq!(
        markdown,
        "See [https://example.com/page](https://example.com/page). And more.\n\n"
    );
}

#[test]
fn second_heading_in_a_row_stays_a_paragraph() {
    let text = "Intro.\n\nSection Header\n\nAnother Header\n\nBody.";
    let markdown = to_markdown(text, &MarkdownOptions::default());
    assert_eq!(
        markdown,
        "Intro.\n\n#### Section Header\n\nAnother Header\n\nBody.\n\n"
    );
}

#[test]
fn diff_tagging_follows_line_markers() {
    let plain = blocks("Code:\n\n\tfoo()\n\tbar()", true);
    assert_eq!(plain[1].kind, BlockKind::Preformatted(CodeLang::Go));

    let diff = blocks("Code:\n\n\t+foo()\n\tbar()", true);
    assert_eq!(diff[1].kind, BlockKind::Preformatted(CodeLang::Diff));
}

fn comment_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Z][a-z ]{0,10}[a-z]",
        "[a-z][a-z.,]{0,10}",
        "\t[a-z+-][a-z+ -]{0,7}",
        "\t\t[a-z+-][a-z]{0,5}",
        "  [a-z(){}]{1,8}",
    ]
}

fn is_blank(line: &str) -> bool {
    line.is_empty() || line == "\n"
}

fn indent(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

/// Whitespace prefix shared by every non-blank line.
fn shared_indent<'a>(lines: &[&'a str]) -> &'a str {
    let mut indents = lines.iter().copied().filter(|line| !is_blank(line)).map(indent);
    let Some(mut shared) = indents.next() else {
        return "";
    };
    for other in indents {
        let len = shared
            .bytes()
            .zip(other.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        shared = &shared[..len];
    }
    shared
}

/// Source lines of a span without the blank lines around them.
fn content<'a>(lines: &'a [&'a str]) -> &'a [&'a str] {
    let start = lines.iter().position(|line| !is_blank(line)).unwrap_or(lines.len());
    let end = lines.iter().rposition(|line| !is_blank(line)).map_or(start, |i| i + 1);
    &lines[start..end]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn block_spans_tile_the_text(lines in prop::collection::vec(comment_line(), 0..24)) {
        let text = lines.join("\n");
        let line_count = text.split_inclusive('\n').count();
        let blocks = blocks(&text, true);

        let mut next = 0;
        for block in &blocks {
            prop_assert_eq!(block.span.start, next);
            prop_assert!(block.span.end > block.span.start);
            next = block.span.end;
        }
        if !blocks.is_empty() {
            prop_assert_eq!(next, line_count);
        }
    }

    #[test]
    fn block_lines_are_the_source_lines_of_their_span(
        lines in prop::collection::vec(comment_line(), 0..24),
    ) {
        let text = lines.join("\n");
        let source: Vec<&str> = text.split_inclusive('\n').collect();
        let shared = shared_indent(&source);

        for block in blocks(&text, true) {
            let region = content(&source[block.span.clone()]);

            if block.kind == BlockKind::Heading {
                prop_assert_eq!(region.len(), 1);
                prop_assert_eq!(&block.lines, &vec![region[0].trim().to_string()]);
                continue;
            }

            prop_assert_eq!(region.len(), block.lines.len());
            let mut code_indent = None;
            for (src, line) in region.iter().zip(&block.lines) {
                if is_blank(src) {
                    prop_assert_eq!(*src, line.as_str());
                    continue;
                }
                prop_assert!(src.ends_with(line.as_str()), "{:?} is not a suffix of {:?}", line, src);
                let removed = &src[..src.len() - line.len()];
                prop_assert!(removed.starts_with(shared));
                prop_assert_eq!(indent(removed), removed);

                match block.kind {
                    BlockKind::Paragraph => {
                        prop_assert_eq!(removed, shared);
                    }
                    _ => {
                        prop_assert_eq!(*code_indent.get_or_insert(removed), removed);
                    }
                }
            }
        }
    }

    #[test]
    fn code_blocks_are_diffs_when_a_line_starts_with_a_marker(
        lines in prop::collection::vec(comment_line(), 0..24),
    ) {
        let text = lines.join("\n");
        let source: Vec<&str> = text.split_inclusive('\n').collect();
        let tagged = blocks(&text, true);
        let untagged = blocks(&text, false);
        prop_assert_eq!(tagged.len(), untagged.len());

        for (block, plain) in tagged.iter().zip(&untagged) {
            prop_assert_eq!(&block.span, &plain.span);
            prop_assert_eq!(&block.lines, &plain.lines);

            let BlockKind::Preformatted(lang) = block.kind else {
                prop_assert_eq!(block.kind, plain.kind);
                continue;
            };
            prop_assert_eq!(plain.kind, BlockKind::Preformatted(CodeLang::Go));

            let marked = content(&source[block.span.clone()])
                .iter()
                .any(|line| line.trim_start_matches([' ', '\t']).starts_with(['+', '-']));
            let expected = if marked { CodeLang::Diff } else { CodeLang::Go };
            prop_assert_eq!(lang, expected);
        }
    }

    #[test]
    fn rendered_markdown_normalizes_cleanly(lines in prop::collection::vec(comment_line(), 0..24)) {
        let markdown = to_markdown(&lines.join("\n"), &MarkdownOptions::default());
        let normalized = normalize(&markdown);
        prop_assert!(!normalized.contains("\n\n\n"));
        prop_assert_eq!(normalize(&normalized), normalized);
    }
}
