//! Approximate word count for mixed CJK / Latin markdown.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Post;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
/// `![alt](src)`; an image renders no text.
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());
/// `[label](href)`; only the label renders.
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'     // Hiragana, Katakana
        | '\u{3400}'..='\u{4DBF}'   // CJK Extension A
        | '\u{4E00}'..='\u{9FFF}'   // CJK Unified Ideographs
        | '\u{AC00}'..='\u{D7AF}'   // Hangul Syllables
        | '\u{F900}'..='\u{FAFF}'   // CJK Compatibility Ideographs
    )
}

/// Count each CJK character as one word and each maximal run of ASCII
/// letters/digits as one word. Only rendered text counts: images, link
/// targets and inline HTML tags are stripped first. Punctuation, whitespace
/// and emoji count for nothing.
pub fn count_words(markdown: &str) -> usize {
    let text = IMAGE.replace_all(markdown, " ");
    let text = LINK.replace_all(&text, " $1 ");
    let text = HTML_TAG.replace_all(&text, " ");

    let mut count = 0;
    let mut in_word = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if !in_word {
                count += 1;
                in_word = true;
            }
        } else {
            in_word = false;
            if is_cjk(c) {
                count += 1;
            }
        }
    }
    count
}

/// Sum of [`count_words`] over each post's content.
pub fn total_word_count(posts: &[Post]) -> usize {
    posts.iter().map(|p| count_words(&p.content)).sum()
}
