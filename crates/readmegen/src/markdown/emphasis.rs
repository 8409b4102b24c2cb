//! Inline link and identifier emphasis for paragraph lines.

use std::collections::HashMap;
use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Optional `(title)` in front of a link, followed by one non-word character.
const URL_TITLE: &str = r"(?:\((?P<title>[^)]+)\)[^0-9A-Za-z_])?";
const PROTOCOL: &str = r"(?:https?|ftp|file|gopher|mailto|nntp)";
const HOST: &str = r"[a-zA-Z0-9_@\-.\[\]:]+";
/// Punctuation is only part of a path when more path characters follow.
const PATH: &str = r"(?:[.,:;?!]*[a-zA-Z0-9$'()*+&#=@~_/\-\[\]%])*";
const LOCAL_PATH: &str = r"\./[a-zA-Z0-9_@\-./]*";
const IDENT: &str = r"[\pL_][\pL_0-9]*";

static MATCH_RX: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?P<link>{URL_TITLE}(?P<target>(?P<url>{PROTOCOL}://{HOST}{PATH})|(?P<local>{LOCAL_PATH})))|(?P<ident>{IDENT})"
    );
    Regex::new(&pattern).expect("emphasis pattern is valid")
});

/// Punctuation that ends a sentence rather than a link.
const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', ':', ';', '?', '!'];

/// Rewrites one paragraph line, turning URLs and local paths into Markdown
/// links and emphasizing identifiers found in `words`.
///
/// A word mapped to a non-empty URL becomes a link with an italic title, a
/// word mapped to an empty string is only italicized. Text inside backtick
/// code spans is left alone, and so is a local path ending in `...`, the Go
/// package pattern (`go test ./...`). The returned line always ends with a
/// newline.
pub fn emphasize(line: &str, words: Option<&HashMap<String, String>>) -> String {
    let mut line = line.to_string();
    if !line.ends_with('\n') {
        line.push('\n');
    }

    let mut out = String::with_capacity(line.len() + 16);
    let mut rest = line.as_str();
    loop {
        let Some(open) = rest.find('`') else {
            emphasize_text(&mut out, rest, words);
            break;
        };
        let Some(close) = rest[open + 1..].find('`').map(|i| open + 1 + i) else {
            emphasize_text(&mut out, rest, words);
            break;
        };
        emphasize_text(&mut out, &rest[..open], words);
        out.push_str(&rest[open..=close]);
        rest = &rest[close + 1..];
    }
    out
}

fn emphasize_text(out: &mut String, mut text: &str, words: Option<&HashMap<String, String>>) {
    while let Some(found) = MATCH_RX.captures(text) {
        let Some(whole) = found.get(0) else {
            break;
        };

        // Unbalanced parentheses belong to the surrounding text, so match
        // again on the balanced prefix only.
        let balanced = paired_parens_prefix_len(whole.as_str());
        let caps = if balanced < whole.len() {
            match MATCH_RX.captures(&text[..whole.start() + balanced]) {
                Some(caps) => caps,
                None => {
                    let next = whole.start()
                        + whole.as_str().chars().next().map_or(1, char::len_utf8);
                    out.push_str(&text[..next]);
                    text = &text[next..];
                    continue;
                }
            }
        } else {
            found
        };
        let Some(m) = caps.get(0) else {
            break;
        };

        out.push_str(&text[..m.start()]);
        let matched = m.as_str();
        let mapped = words.and_then(|words| words.get(matched));

        if caps.name("link").is_some() {
            write_link(out, &caps, matched, mapped);
        } else {
            match mapped {
                Some(url) if !url.is_empty() => {
                    let _ = write!(out, "[*{matched}*]({url})");
                }
                Some(_) => {
                    out.push('*');
                    out.push_str(matched);
                    out.push('*');
                }
                None => out.push_str(matched),
            }
        }

        text = &text[m.end()..];
    }
    out.push_str(text);
}

fn write_link(out: &mut String, caps: &Captures<'_>, matched: &str, mapped: Option<&String>) {
    let target = caps.name("target").map_or(matched, |m| m.as_str());

    // Go package patterns like ./... are paths, not links.
    if mapped.is_none() && caps.name("local").is_some() && target.ends_with("...") {
        out.push_str(matched);
        return;
    }

    let (mut title, mut url, image) = match (mapped, caps.name("title")) {
        (Some(url), _) if !url.is_empty() => (matched, url.as_str(), false),
        (Some(_), _) => {
            out.push_str(matched);
            return;
        }
        (None, Some(title)) => match title.as_str().strip_prefix("image/") {
            Some(title) => (title, target, true),
            None => (title.as_str(), target, false),
        },
        (None, None) => (matched, matched, false),
    };

    let mut after = None;
    if let Some(last) = url.chars().next_back() {
        if TRAILING_PUNCTUATION.contains(&last) {
            after = Some(last);
            url = &url[..url.len() - last.len_utf8()];
            if let Some(stripped) = title.strip_suffix(last) {
                title = stripped;
            }
        }
    }

    if image {
        out.push('!');
    }
    out.push('[');
    out.push_str(&html_escape(title));
    out.push_str("](");
    out.push_str(url);
    out.push(')');
    if let Some(after) = after {
        out.push(after);
    }
}

/// Length of the longest prefix of `s` that does not leave a parenthesis open
/// or close one that was never opened.
fn paired_parens_prefix_len(s: &str) -> usize {
    let mut parens = 0i32;
    let mut len = s.len();
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => {
                if parens == 0 {
                    len = i;
                }
                parens += 1;
            }
            ')' => {
                parens -= 1;
                if parens == 0 {
                    len = s.len();
                } else if parens < 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    len
}

fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '\0' => escaped.push('\u{FFFD}'),
            ch => escaped.push(ch),
        }
    }
    escaped
}
