//! Fenced code block extraction.
//!
//! Runs before anything else: every closed backtick fence is rendered to
//! `<pre><code>` and replaced by a code block placeholder on its own line.
//! Fences inside blockquotes are extracted the same way, with the token
//! keeping the quote markers of its line.

use std::borrow::Cow;

use crate::block::{self, MAX_NESTING};
use crate::html;
use crate::placeholder::PlaceholderTable;

/// An opening fence line.
#[derive(Debug, PartialEq, Eq)]
struct Fence<'a> {
    /// Number of backticks in the opening fence (minimum length for closing).
    len: usize,
    /// First word of the info string.
    lang: Option<&'a str>,
}

impl<'a> Fence<'a> {
    /// Detect an opening fence.
    ///
    /// The info string of a backtick fence may not contain backticks, so
    /// ```` ```inline``` ```` on one line is not a fence.
    fn open(line: &'a str) -> Option<Self> {
        let trimmed = line.trim_start();
        let len = trimmed.bytes().take_while(|&b| b == b'`').count();
        if len < 3 {
            return None;
        }

        let info = trimmed[len..].trim();
        if info.contains('`') {
            return None;
        }

        Some(Self {
            len,
            lang: info.split_whitespace().next(),
        })
    }

    /// Check if a line closes this fence.
    ///
    /// The closing fence must be at least as long as the opening one and
    /// contain nothing but backticks and whitespace.
    #[cfg(test)]
    fn is_closed_by(&self, line: &str) -> bool {
        closing_len(line).is_some_and(|len| len >= self.len)
    }
}

/// Backtick count of a line that can close a fence.
fn closing_len(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let count = trimmed.bytes().take_while(|&b| b == b'`').count();
    (count >= 3 && trimmed[count..].chars().all(char::is_whitespace)).then_some(count)
}

/// For every opening fence line, the index of the line that closes it.
///
/// One backward pass keeps the closers after the current line on a stack,
/// nearest on top. A closer hides every farther closer that is not longer,
/// so lengths grow towards the bottom and the first long enough closer is
/// found by binary search. Unclosed openers never rescan the rest of the text.
fn find_closers(lines: &[&str]) -> Vec<Option<usize>> {
    let mut closers = vec![None; lines.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for (idx, &line) in lines.iter().enumerate().rev() {
        if let Some(fence) = Fence::open(line) {
            let long_enough = stack.partition_point(|&(len, _)| len >= fence.len);
            closers[idx] = long_enough.checked_sub(1).map(|pos| stack[pos].1);
        }
        if let Some(len) = closing_len(line) {
            while stack.last().is_some_and(|&(top, _)| top <= len) {
                stack.pop();
            }
            stack.push((len, idx));
        }
    }

    closers
}

/// Replace closed code fences with block placeholders.
///
/// An opening fence without a closing line is left as ordinary text.
pub(crate) fn extract_code_blocks(text: &str, table: &mut PlaceholderTable) -> String {
    extract_at_depth(text, 0, table)
}

/// Extract fences at one blockquote `depth`.
///
/// Quote runs are recognised exactly where the block splitter recognises
/// them, so a token always ends up alone on a line of its quote.
fn extract_at_depth(text: &str, depth: usize, table: &mut PlaceholderTable) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let closers = find_closers(&lines);
    let mut out: Vec<Cow<'_, str>> = Vec::with_capacity(lines.len());

    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx];
        if let Some(fence) = Fence::open(line)
            && let Some(close) = closers[idx]
        {
            let content = lines[idx + 1..close].join("\n");
            let mut rendered = String::new();
            html::code_block(fence.lang, &content, &mut rendered);
            out.push(Cow::Owned(table.insert(rendered)));
            idx = close + 1;
            continue;
        }

        if depth < MAX_NESTING && block::quote_line(line).is_some() {
            let inner: Vec<&str> = lines[idx..]
                .iter()
                .map_while(|&l| block::quote_line(l))
                .collect();
            let run = inner.len();

            let before = table.len();
            let extracted = extract_at_depth(&inner.join("\n"), depth + 1, table);
            if table.len() == before {
                out.extend(lines[idx..idx + run].iter().map(|&l| Cow::Borrowed(l)));
            } else {
                out.extend(extracted.split('\n').map(|l| Cow::Owned(format!("> {l}"))));
            }
            idx += run;
            continue;
        }

        out.push(Cow::Borrowed(line));
        idx += 1;
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::{PlaceholderKind, is_block_token};

    fn extract(text: &str) -> (String, PlaceholderTable) {
        let mut table = PlaceholderTable::new(PlaceholderKind::CodeBlock);
        let out = extract_code_blocks(text, &mut table);
        (out, table)
    }

    #[test]
    fn test_open_with_language() {
        assert_eq!(
            Fence::open("```rust"),
            Some(Fence {
                len: 3,
                lang: Some("rust")
            })
        );
    }

    #[test]
    fn test_open_takes_first_word_of_info() {
        let fence = Fence::open("```python title=app.py").unwrap();
        assert_eq!(fence.lang, Some("python"));
    }

    #[test]
    fn test_two_backticks_not_fence() {
        assert_eq!(Fence::open("``inline code``"), None);
    }

    #[test]
    fn test_single_line_triple_backticks_not_fence() {
        assert_eq!(Fence::open("```inline```"), None);
    }

    #[test]
    fn test_indented_fence() {
        let fence = Fence::open("   ```").unwrap();
        assert!(fence.is_closed_by("  ```"));
    }

    #[test]
    fn test_shorter_fence_not_closing() {
        let fence = Fence::open("````").unwrap();
        assert!(!fence.is_closed_by("```"));
        assert!(fence.is_closed_by("`````"));
    }

    #[test]
    fn test_closing_fence_with_trailing_text_not_closing() {
        let fence = Fence::open("```").unwrap();
        assert!(!fence.is_closed_by("``` more"));
        assert!(fence.is_closed_by("```  "));
    }

    #[test]
    fn test_extract_replaces_block_with_token_line() {
        let (out, table) = extract("before\n```js\nlet a = 1;\n```\nafter");
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "before");
        assert!(is_block_token(lines[1]));
        assert_eq!(lines[2], "after");
        assert_eq!(
            table.restore(lines[1]),
            r#"<pre><code class="language-js">let a = 1;</code></pre>"#
        );
    }

    #[test]
    fn test_extract_escapes_content() {
        let (out, table) = extract("```\n<b>&</b>\n```");
        assert_eq!(
            table.restore(&out),
            "<pre><code>&lt;b&gt;&amp;&lt;/b&gt;</code></pre>"
        );
    }

    #[test]
    fn test_extract_keeps_markdown_literal() {
        let (out, table) = extract("```\n**not bold**\n```");
        assert_eq!(table.restore(&out), "<pre><code>**not bold**</code></pre>");
    }

    #[test]
    fn test_unclosed_fence_left_as_text() {
        let (out, table) = extract("```rust\nfn main() {}");
        assert_eq!(out, "```rust\nfn main() {}");
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_multiple_blocks() {
        let (out, table) = extract("```\na\n```\n\n```\nb\n```");
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.restore(&out),
            "<pre><code>a</code></pre>\n\n<pre><code>b</code></pre>"
        );
    }

    #[test]
    fn test_closers_match_nearest_long_enough_line() {
        let lines = ["````", "```", "```x", "`````", "```", "```"];
        assert_eq!(
            find_closers(&lines),
            vec![Some(3), Some(3), Some(3), None, Some(5), None]
        );
    }

    #[test]
    fn test_many_unclosed_openers_left_as_text() {
        let text = "````x\n".repeat(20_000);
        let (out, table) = extract(&text);
        assert_eq!(out, text);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_quoted_fence_becomes_quoted_token() {
        let (out, table) = extract("> intro\n> ```rust\n> let x = 1;\n> ```\nafter");
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "> intro");
        assert!(is_block_token(lines[1].strip_prefix("> ").unwrap()));
        assert_eq!(lines[2], "after");
        assert_eq!(
            table.restore(lines[1]),
            r#"> <pre><code class="language-rust">let x = 1;</code></pre>"#
        );
    }

    #[test]
    fn test_nested_quote_fence() {
        let (out, table) = extract(">> ```\n>> a\n>> ```");
        assert_eq!(table.len(), 1);
        assert_eq!(table.restore(&out), "> > <pre><code>a</code></pre>");
    }

    #[test]
    fn test_quote_without_fence_kept_verbatim() {
        let (out, table) = extract("  >no space\n>  two");
        assert_eq!(out, "  >no space\n>  two");
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_fence_must_close_inside_quote() {
        let (out, table) = extract("> ```\n> a\n```");
        assert_eq!(out, "> ```\n> a\n```");
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_empty_block() {
        let (out, table) = extract("```\n```");
        assert_eq!(table.restore(&out), "<pre><code></code></pre>");
    }
}
