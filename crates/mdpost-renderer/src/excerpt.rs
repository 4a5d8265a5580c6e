//! Plain-text excerpts of Markdown posts.
//!
//! Used for post cards and descriptions: Markdown syntax is stripped, lines
//! are joined with spaces and the result is cut to a maximum length.

use std::sync::LazyLock;

use regex::Regex;

/// Default excerpt length in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

/// Marker appended to truncated text.
const ELLIPSIS: &str = "...";

static HEADING_MARKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#{1,6}\s+").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[-*+]\s+").unwrap());
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s+").unwrap());
static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Strip Markdown syntax and truncate to `max_len` characters.
///
/// # Examples
///
/// ```
/// use mdpost_renderer::extract_text;
///
/// let text = extract_text("# Hello\n\nSome **bold** [link](/x).", 200);
/// assert_eq!(text, "Hello Some bold link.");
/// ```
pub fn extract_text(markdown: &str, max_len: usize) -> String {
    let text = markdown.replace("\r\n", "\n");
    let text = HEADING_MARKS.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "${1}");
    let text = ITALIC.replace_all(&text, "${1}");
    let text = INLINE_CODE.replace_all(&text, "${1}");
    let text = LINK.replace_all(&text, "${1}");
    let text = BULLET.replace_all(&text, "");
    let text = NUMBERED.replace_all(&text, "");
    let text = NEWLINES.replace_all(&text, " ");

    truncate(text.trim(), max_len)
}

/// Cut text to at most `max_len` characters, appending `...` when cut.
///
/// Counts characters, not bytes, so multi-byte text is never split inside a
/// code point. Trailing whitespace before the ellipsis is removed.
///
/// # Examples
///
/// ```
/// use mdpost_renderer::truncate;
///
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("hello world", 6), "hello...");
/// ```
pub fn truncate(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_owned(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", text[..cut].trim_end()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_headings() {
        assert_eq!(extract_text("## Section", 200), "Section");
    }

    #[test]
    fn test_strips_emphasis() {
        assert_eq!(extract_text("**bold** and *italic*", 200), "bold and italic");
    }

    #[test]
    fn test_strips_inline_code() {
        assert_eq!(extract_text("run `cargo test`", 200), "run cargo test");
    }

    #[test]
    fn test_keeps_link_label() {
        assert_eq!(
            extract_text("read [the guide](https://example.com/guide)", 200),
            "read the guide"
        );
    }

    #[test]
    fn test_strips_list_markers() {
        assert_eq!(
            extract_text("- first\n* second\n1. third\n  2. fourth", 200),
            "first second third fourth"
        );
    }

    #[test]
    fn test_joins_lines() {
        assert_eq!(extract_text("a\n\n\nb\r\nc", 200), "a b c");
    }

    #[test]
    fn test_truncates_long_text() {
        let text = extract_text(&"word ".repeat(100), 12);
        assert_eq!(text, "word word wo...");
    }

    #[test]
    fn test_empty() {
        assert_eq!(extract_text("", 200), "");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        assert_eq!(truncate("abcde", 5), "abcde");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("ação rápida", 4), "ação...");
    }

    #[test]
    fn test_truncate_trims_before_ellipsis() {
        assert_eq!(truncate("abc   def", 5), "abc...");
    }

    #[test]
    fn test_truncate_zero() {
        assert_eq!(truncate("abc", 0), "...");
    }
}
