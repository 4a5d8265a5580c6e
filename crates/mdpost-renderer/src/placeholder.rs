//! Extract-protect-restore tables for code content.
//!
//! Code is rendered to HTML up front and swapped for a token so that later
//! stages never see it. Tokens are delimited by two Unicode noncharacters:
//!
//! ```text
//! U+FDD0 <kind letter> <index> U+FDD1
//! ```
//!
//! Both sentinels are stripped from the input before any extraction, so a
//! token can never collide with user text.

use std::borrow::Cow;

/// Opening sentinel of a placeholder token.
const OPEN: char = '\u{FDD0}';
/// Closing sentinel of a placeholder token.
const CLOSE: char = '\u{FDD1}';

/// Kind of protected content, encoded as the first character of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlaceholderKind {
    /// Fenced code block (block-level, always on its own line).
    CodeBlock,
    /// Inline code span.
    InlineCode,
}

impl PlaceholderKind {
    fn letter(self) -> char {
        match self {
            Self::CodeBlock => 'B',
            Self::InlineCode => 'I',
        }
    }
}

/// Ordered table of rendered HTML, referenced from the working text by index.
#[derive(Debug)]
pub(crate) struct PlaceholderTable {
    kind: PlaceholderKind,
    items: Vec<String>,
}

impl PlaceholderTable {
    pub(crate) fn new(kind: PlaceholderKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// Store rendered HTML and return the token that stands in for it.
    pub(crate) fn insert(&mut self, html: String) -> String {
        let index = self.items.len();
        self.items.push(html);
        format!("{OPEN}{}{index}{CLOSE}", self.kind.letter())
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Replace every token of this table's kind with its HTML.
    ///
    /// Single left-to-right pass: restored HTML is never rescanned, and tokens
    /// belonging to another table are copied through untouched.
    pub(crate) fn restore(&self, text: &str) -> String {
        if self.items.is_empty() {
            return text.to_owned();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len_utf8()..];
            if let Some((html, consumed)) = self.lookup(after) {
                out.push_str(html);
                rest = &after[consumed..];
            } else {
                out.push(OPEN);
                rest = after;
            }
        }
        out.push_str(rest);
        out
    }

    /// Resolve the token body following an opening sentinel.
    ///
    /// Returns the stored HTML and the number of bytes the body spans,
    /// closing sentinel included.
    fn lookup(&self, body: &str) -> Option<(&str, usize)> {
        let letter = self.kind.letter();
        let digits = body.strip_prefix(letter)?;
        let end = digits.find(CLOSE)?;
        let index: usize = digits[..end].parse().ok()?;
        let html = self.items.get(index)?;
        Some((html, letter.len_utf8() + end + CLOSE.len_utf8()))
    }
}

/// Remove sentinel characters from user input.
pub(crate) fn strip_sentinels(input: &str) -> Cow<'_, str> {
    if input.contains([OPEN, CLOSE]) {
        Cow::Owned(input.replace([OPEN, CLOSE], ""))
    } else {
        Cow::Borrowed(input)
    }
}

/// Check whether a line consists of a single code block token.
pub(crate) fn is_block_token(line: &str) -> bool {
    let Some(body) = line.trim().strip_prefix(OPEN) else {
        return false;
    };
    let Some(digits) = body.strip_prefix(PlaceholderKind::CodeBlock.letter()) else {
        return false;
    };
    digits
        .strip_suffix(CLOSE)
        .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_returns_distinct_tokens() {
        let mut table = PlaceholderTable::new(PlaceholderKind::InlineCode);
        let first = table.insert("<code>a</code>".to_owned());
        let second = table.insert("<code>b</code>".to_owned());
        assert_ne!(first, second);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_restore_round_trip() {
        let mut table = PlaceholderTable::new(PlaceholderKind::InlineCode);
        let token = table.insert("<code>x</code>".to_owned());
        let text = format!("before {token} after");
        assert_eq!(table.restore(&text), "before <code>x</code> after");
    }

    #[test]
    fn test_restore_empty_table_is_identity() {
        let table = PlaceholderTable::new(PlaceholderKind::CodeBlock);
        assert_eq!(table.restore("unchanged"), "unchanged");
    }

    #[test]
    fn test_restore_leaves_other_kind_untouched() {
        let mut blocks = PlaceholderTable::new(PlaceholderKind::CodeBlock);
        let mut inline = PlaceholderTable::new(PlaceholderKind::InlineCode);
        let block_token = blocks.insert("<pre></pre>".to_owned());
        let inline_token = inline.insert("<code></code>".to_owned());
        let text = format!("{block_token}|{inline_token}");

        let after_blocks = blocks.restore(&text);
        assert_eq!(after_blocks, format!("<pre></pre>|{inline_token}"));
        assert_eq!(inline.restore(&after_blocks), "<pre></pre>|<code></code>");
    }

    #[test]
    fn test_restored_html_is_not_rescanned() {
        let mut table = PlaceholderTable::new(PlaceholderKind::InlineCode);
        let first = table.insert(String::new());
        // The second entry's HTML looks like the first token; it must come out verbatim.
        let second = table.insert(first.clone());
        assert_eq!(table.restore(&second), first);
    }

    #[test]
    fn test_strip_sentinels() {
        assert_eq!(strip_sentinels("a\u{FDD0}B0\u{FDD1}b"), "aB0b");
        assert!(matches!(strip_sentinels("clean"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_is_block_token() {
        let mut table = PlaceholderTable::new(PlaceholderKind::CodeBlock);
        let token = table.insert(String::new());
        assert!(is_block_token(&token));
        assert!(is_block_token(&format!("  {token}  ")));
        assert!(!is_block_token(&format!("text {token}")));
        assert!(!is_block_token("\u{FDD0}I0\u{FDD1}"));
        assert!(!is_block_token("\u{FDD0}B\u{FDD1}"));
    }
}
