use std::fmt::Write;

use crate::generators::document::{
    Badge, Document, ExampleEntry, FuncEntry, Section, SubPackageEntry, TypeEntry, ValueEntry,
};
use crate::markdown::{MarkdownOptions, write_markdown};

const CREDIT: &str = "Readme created from Go doc with readmegen";

/// Render a README document as GitHub-flavoured Markdown.
///
/// The output may contain runs of more than two newlines; it is meant to be
/// written through [`crate::normalize::NewlineLimiter`].
pub fn render_markdown(document: &Document<'_>, options: &MarkdownOptions) -> String {
    let mut output = String::new();

    for section in &document.sections {
        match section {
            Section::Title(title) => {
                let _ = writeln!(&mut output, "# {title}\n");
            }
            Section::Badges(badges) => {
                for badge in badges {
                    render_badge(&mut output, badge);
                }
                output.push('\n');
            }
            Section::Doc(doc) => {
                write_markdown(&mut output, doc, options);
            }
            Section::Constants(values) => {
                let _ = writeln!(&mut output, "## Constants\n");
                render_values(&mut output, values, options);
            }
            Section::Variables(values) => {
                let _ = writeln!(&mut output, "## Variables\n");
                render_values(&mut output, values, options);
            }
            Section::Functions(funcs) => {
                let _ = writeln!(&mut output, "## Functions\n");
                for func in funcs {
                    render_func(&mut output, func, 3, options);
                }
            }
            Section::Types(types) => {
                let _ = writeln!(&mut output, "## Types\n");
                for ty in types {
                    render_type(&mut output, ty, options);
                }
            }
            Section::SubPackages(subs) => {
                let _ = writeln!(&mut output, "## Sub Packages\n");
                for sub in subs {
                    render_sub_package(&mut output, sub);
                }
                output.push('\n');
            }
            Section::Examples(examples) => {
                let _ = writeln!(&mut output, "## Examples\n");
                for example in examples {
                    let name = non_empty(example.name).unwrap_or("Example");
                    let _ = writeln!(&mut output, "### {name}\n");
                    render_example_body(&mut output, example, options);
                }
            }
            Section::Credit => {
                let _ = writeln!(&mut output, "---\n\n{CREDIT}");
            }
        }
    }

    output
}

fn render_badge(buffer: &mut String, badge: &Badge) {
    let _ = writeln!(buffer, "[![{}]({})]({})", badge.alt, badge.image, badge.link);
}

fn render_values(buffer: &mut String, values: &[ValueEntry<'_>], options: &MarkdownOptions) {
    for value in values {
        write_markdown(buffer, value.doc, options);
        render_code(buffer, "go", value.decl);
    }
}

fn render_func(buffer: &mut String, func: &FuncEntry<'_>, level: usize, options: &MarkdownOptions) {
    let hashes = "#".repeat(level);
    let mut heading = String::from("func ");
    if let Some(recv) = func.recv {
        let _ = write!(heading, "({recv}) ");
    }
    heading.push_str(&linked(func.name, func.link.as_deref()));

    let _ = writeln!(buffer, "{hashes} {heading}\n");
    let _ = writeln!(buffer, "`{}`\n", func.decl.trim_end());
    write_markdown(buffer, func.doc, options);
    render_inline_examples(buffer, &func.examples, level + 1, options);
}

fn render_type(buffer: &mut String, ty: &TypeEntry<'_>, options: &MarkdownOptions) {
    let _ = writeln!(buffer, "### type {}\n", linked(ty.name, ty.link.as_deref()));
    let _ = writeln!(buffer, "`{}`\n", ty.decl.trim_end());
    write_markdown(buffer, ty.doc, options);

    render_values(buffer, &ty.consts, options);
    render_values(buffer, &ty.vars, options);
    for factory in &ty.factories {
        render_func(buffer, factory, 4, options);
    }
    for method in &ty.methods {
        render_func(buffer, method, 4, options);
    }
    render_inline_examples(buffer, &ty.examples, 4, options);
}

fn render_inline_examples(
    buffer: &mut String,
    examples: &[ExampleEntry<'_>],
    level: usize,
    options: &MarkdownOptions,
) {
    let hashes = "#".repeat(level);
    for example in examples {
        match non_empty(example.name) {
            Some(name) => {
                let _ = writeln!(buffer, "{hashes} Example {name}\n");
            }
            None => {
                let _ = writeln!(buffer, "{hashes} Example\n");
            }
        }
        render_example_body(buffer, example, options);
    }
}

fn render_example_body(buffer: &mut String, example: &ExampleEntry<'_>, options: &MarkdownOptions) {
    write_markdown(buffer, example.doc, options);
    render_code(buffer, "go", example.code);
    if non_empty(example.output).is_some() {
        let _ = writeln!(buffer, "Output:\n");
        render_code(buffer, "", example.output);
    }
}

fn render_sub_package(buffer: &mut String, sub: &SubPackageEntry<'_>) {
    let _ = write!(buffer, "* [{path}](./{path})", path = sub.path);
    if !sub.synopsis.is_empty() {
        let _ = write!(buffer, ": {}", sub.synopsis);
    }
    buffer.push('\n');
}

fn render_code(buffer: &mut String, lang: &str, code: &str) {
    let _ = writeln!(buffer, "```{lang}");
    let _ = writeln!(buffer, "{}", code.trim_end_matches('\n'));
    let _ = writeln!(buffer, "```\n");
}

fn linked(name: &str, link: Option<&str>) -> String {
    match link {
        Some(link) => format!("[{name}]({link})"),
        None => name.to_string(),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(sections: Vec<Section<'_>>) -> String {
        render_markdown(&Document { sections }, &MarkdownOptions::default())
    }

    #[test]
    fn title_badges_and_doc() {
        let output = render(vec![
            Section::Title("pkg"),
            Section::Badges(vec![Badge {
                alt: "GoDoc",
                image: "https://img.example/doc".to_string(),
                link: "https://pkg.example".to_string(),
            }]),
            Section::Doc("Package pkg is great."),
        ]);
        assert_eq!(
            output,
            "# pkg\n\n[![GoDoc](https://img.example/doc)](https://pkg.example)\n\nPackage pkg is great.\n\n"
        );
    }

    #[test]
    fn function_heading_links_to_source() {
        let output = render(vec![Section::Functions(vec![FuncEntry {
            name: "Run",
            recv: None,
            link: Some("/run.go#L3".to_string()),
            decl: "func Run() error",
            doc: "Run runs.",
            examples: Vec::new(),
        }])]);
        assert_eq!(
            output,
            "## Functions\n\n### func [Run](/run.go#L3)\n\n`func Run() error`\n\nRun runs.\n\n"
        );
    }

    #[test]
    fn methods_show_receiver() {
        let output = render(vec![Section::Types(vec![TypeEntry {
            name: "Client",
            link: None,
            decl: "type Client struct { ... }".to_string(),
            doc: "",
            consts: Vec::new(),
            vars: Vec::new(),
            factories: Vec::new(),
            methods: vec![FuncEntry {
                name: "Do",
                recv: Some("*Client"),
                link: None,
                decl: "func (c *Client) Do()",
                doc: "",
                examples: Vec::new(),
            }],
            examples: Vec::new(),
        }])]);
        assert!(output.contains("### type Client\n\n`type Client struct { ... }`\n\n"));
        assert!(output.contains("#### func (*Client) Do\n\n`func (c *Client) Do()`\n\n"));
    }

    #[test]
    fn examples_with_output() {
        let output = render(vec![Section::Examples(vec![ExampleEntry {
            name: "Hello",
            doc: "",
            code: "fmt.Println(\"hi\")\n",
            output: "hi\n",
        }])]);
        assert_eq!(
            output,
            "## Examples\n\n### Hello\n\n```go\nfmt.Println(\"hi\")\n```\n\nOutput:\n\n```\nhi\n```\n\n"
        );
    }

    #[test]
    fn sub_packages_with_and_without_synopsis() {
        let output = render(vec![Section::SubPackages(vec![
            SubPackageEntry {
                path: "a",
                synopsis: "Package a does a.".to_string(),
            },
            SubPackageEntry {
                path: "b",
                synopsis: String::new(),
            },
        ])]);
        assert_eq!(
            output,
            "## Sub Packages\n\n* [a](./a): Package a does a.\n* [b](./b)\n\n"
        );
    }

    #[test]
    fn credit_line() {
        assert_eq!(render(vec![Section::Credit]), format!("---\n\n{CREDIT}\n"));
    }
}
