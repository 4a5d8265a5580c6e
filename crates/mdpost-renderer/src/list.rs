//! List item recognition.

/// Width a tab counts for when measuring indentation.
const TAB_WIDTH: usize = 4;

/// Longest run of digits accepted as an ordered list number.
const MAX_NUMBER_DIGITS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    /// `-`, `*` or `+` marker.
    Unordered,
    /// `1.` style marker.
    Ordered,
}

impl ListKind {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// One list line with its marker removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListItem<'a> {
    /// Leading whitespace width, tabs counted as four columns.
    pub indent: usize,
    pub kind: ListKind,
    /// Number of an ordered item.
    pub number: Option<u32>,
    /// Item text after the marker.
    pub text: &'a str,
}

/// Task list checkbox state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskMarker {
    Unchecked,
    Checked,
}

/// Parse a list line: a marker followed by whitespace.
pub(crate) fn parse_item(line: &str) -> Option<ListItem<'_>> {
    let body = line.trim_start();
    let indent: usize = line[..line.len() - body.len()]
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum();

    let (kind, number, rest) = match *body.as_bytes().first()? {
        b'-' | b'*' | b'+' => (ListKind::Unordered, None, &body[1..]),
        b'0'..=b'9' => {
            let digits = body.bytes().take_while(u8::is_ascii_digit).count();
            if digits > MAX_NUMBER_DIGITS {
                return None;
            }
            let rest = body[digits..].strip_prefix('.')?;
            (ListKind::Ordered, body[..digits].parse().ok(), rest)
        }
        _ => return None,
    };

    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    Some(ListItem {
        indent,
        kind,
        number,
        text: rest.trim(),
    })
}

/// Split a leading `[ ]` / `[x]` task marker off an item's text.
pub(crate) fn task_marker(text: &str) -> Option<(TaskMarker, &str)> {
    let (marker, rest) = if let Some(rest) = text.strip_prefix("[ ]") {
        (TaskMarker::Unchecked, rest)
    } else if let Some(rest) = text
        .strip_prefix("[x]")
        .or_else(|| text.strip_prefix("[X]"))
    {
        (TaskMarker::Checked, rest)
    } else {
        return None;
    };

    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some((marker, rest.trim_start()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered_markers() {
        for line in ["- a", "* a", "+ a"] {
            let item = parse_item(line).unwrap();
            assert_eq!(item.kind, ListKind::Unordered);
            assert_eq!(item.text, "a");
            assert_eq!(item.indent, 0);
        }
    }

    #[test]
    fn test_ordered_marker() {
        let item = parse_item("12. twelve").unwrap();
        assert_eq!(item.kind, ListKind::Ordered);
        assert_eq!(item.number, Some(12));
        assert_eq!(item.text, "twelve");
    }

    #[test]
    fn test_marker_requires_whitespace() {
        assert!(parse_item("-a").is_none());
        assert!(parse_item("**bold**").is_none());
        assert!(parse_item("*em* text").is_none());
        assert!(parse_item("1.5 million").is_none());
        assert!(parse_item("---").is_none());
    }

    #[test]
    fn test_not_a_list() {
        assert!(parse_item("plain").is_none());
        assert!(parse_item("2023 was a year").is_none());
        assert!(parse_item("").is_none());
    }

    #[test]
    fn test_indent_counts_tabs() {
        assert_eq!(parse_item("  - a").unwrap().indent, 2);
        assert_eq!(parse_item("\t- a").unwrap().indent, 4);
    }

    #[test]
    fn test_too_many_digits() {
        assert!(parse_item("12345678901. x").is_none());
    }

    #[test]
    fn test_empty_item_text() {
        let item = parse_item("- ").unwrap();
        assert_eq!(item.text, "");
    }

    #[test]
    fn test_task_markers() {
        assert_eq!(task_marker("[ ] todo"), Some((TaskMarker::Unchecked, "todo")));
        assert_eq!(task_marker("[x] done"), Some((TaskMarker::Checked, "done")));
        assert_eq!(task_marker("[X] done"), Some((TaskMarker::Checked, "done")));
        assert_eq!(task_marker("[link](url)"), None);
        assert_eq!(task_marker("[x]y"), None);
    }
}
