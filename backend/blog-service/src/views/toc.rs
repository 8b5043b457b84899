//! Table of contents for the post detail page.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static INLINE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap());
static INLINE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+|~~|`+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub id: String,
    pub text: String,
}

/// Anchor id for the `index`-th heading: lower-cased text, whitespace runs
/// replaced by `-`, suffixed with the index to keep ids unique.
pub fn heading_id(text: &str, index: usize) -> String {
    format!("{}-{}", WHITESPACE.replace_all(&text.to_lowercase(), "-"), index)
}

/// Heading text as it reads once rendered: link labels kept, emphasis,
/// strikethrough and code markers dropped.
fn plain_text(inline: &str) -> String {
    let text = INLINE_LINK.replace_all(inline, "$1");
    let text = INLINE_MARKER.replace_all(&text, "");
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

fn level_three_text(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix("###")?;
    if !(rest.starts_with(' ') || rest.starts_with('\t')) {
        return None;
    }
    let text = plain_text(rest.trim().trim_end_matches('#'));
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Level-3 ATX headings of a markdown document, skipping fenced code.
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut in_fence = false;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(text) = level_three_text(line) {
            let index = headings.len();
            headings.push(Heading {
                id: heading_id(&text, index),
                text,
            });
        }
    }
    headings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_slugged_and_indexed() {
        assert_eq!(heading_id("Getting  Started Now", 0), "getting-started-now-0");
        assert_eq!(heading_id("第一部分", 2), "第一部分-2");
    }

    #[test]
    fn only_level_three_headings_outside_code() {
        let md = "# Title\n### Intro\ntext\n#### Deep\n```\n### not a heading\n```\n###  Wrap Up ##\n###NoSpace";
        let headings = extract_headings(md);
        assert_eq!(
            headings,
            vec![
                Heading { id: "intro-0".into(), text: "Intro".into() },
                Heading { id: "wrap-up-1".into(), text: "Wrap Up".into() },
            ]
        );
    }

    #[test]
    fn inline_markdown_is_dropped_from_headings() {
        let md = "### **Async** Rust\n### Using `tokio::spawn`\n### See [the book](https://doc.rust-lang.org/book/)";
        let headings = extract_headings(md);
        assert_eq!(
            headings,
            vec![
                Heading { id: "async-rust-0".into(), text: "Async Rust".into() },
                Heading { id: "using-tokio::spawn-1".into(), text: "Using tokio::spawn".into() },
                Heading { id: "see-the-book-2".into(), text: "See the book".into() },
            ]
        );
    }
}
