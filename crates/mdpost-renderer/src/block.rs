//! Block splitting.
//!
//! Classifies the working text line by line. Priority per line: code block
//! placeholder, heading, horizontal rule, table, list item, blockquote, text.
//! Consecutive text lines form a paragraph; a blank line ends it.

use std::sync::LazyLock;

use regex::Regex;

use crate::list::{self, ListItem};
use crate::placeholder;
use crate::table::{self, Table};

/// Deepest blockquote or list nesting that is honoured.
///
/// Deeper markers are treated as text (quotes) or as siblings (list items).
pub(crate) const MAX_NESTING: usize = 32;

// `#{1,6}` must be followed by whitespace, so seven hashes never match.
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.+)$").unwrap());

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Block<'a> {
    Heading { level: usize, text: &'a str },
    Rule,
    /// Code block placeholder token.
    Code(&'a str),
    Table(Table<'a>),
    List(Vec<ListItem<'a>>),
    /// Quote content with the `>` markers stripped.
    Blockquote(String),
    Paragraph(Vec<&'a str>),
}

/// Split text into blocks.
///
/// `depth` is the current blockquote nesting; past [`MAX_NESTING`] quote
/// markers are no longer recognised.
pub(crate) fn parse_blocks(text: &str, gfm: bool, depth: usize) -> Vec<Block<'_>> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx];
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            idx += 1;
            continue;
        }

        let (block, consumed) = if placeholder::is_block_token(line) {
            (Block::Code(trimmed), 1)
        } else if let Some(heading) = heading(line) {
            (heading, 1)
        } else if is_rule(trimmed) {
            (Block::Rule, 1)
        } else if let Some((table, consumed)) = gfm.then(|| table::parse(&lines[idx..])).flatten()
        {
            (Block::Table(table), consumed)
        } else if list::parse_item(line).is_some() {
            let items: Vec<ListItem<'_>> = lines[idx..]
                .iter()
                .map_while(|&l| list::parse_item(l))
                .collect();
            let consumed = items.len();
            (Block::List(items), consumed)
        } else if depth < MAX_NESTING && quote_line(line).is_some() {
            let inner: Vec<&str> = lines[idx..]
                .iter()
                .map_while(|&l| quote_line(l))
                .collect();
            let consumed = inner.len();
            (Block::Blockquote(inner.join("\n")), consumed)
        } else {
            paragraph.push(trimmed);
            idx += 1;
            continue;
        };

        flush_paragraph(&mut paragraph, &mut blocks);
        blocks.push(block);
        idx += consumed;
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn flush_paragraph<'a>(paragraph: &mut Vec<&'a str>, blocks: &mut Vec<Block<'a>>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

fn heading(line: &str) -> Option<Block<'_>> {
    let caps = HEADING.captures(line)?;
    let text = caps.get(2)?.as_str().trim();
    if text.is_empty() {
        return None;
    }
    Some(Block::Heading {
        level: caps.get(1)?.as_str().len(),
        text,
    })
}

/// Three or more hyphens and nothing else.
fn is_rule(trimmed: &str) -> bool {
    trimmed.len() >= 3 && trimmed.bytes().all(|b| b == b'-')
}

/// Strip a `>` marker and one following space.
pub(crate) fn quote_line(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListKind;

    fn parse(text: &str) -> Vec<Block<'_>> {
        parse_blocks(text, true, 0)
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=6 {
            let line = format!("{} Title", "#".repeat(level));
            let blocks = parse_blocks(&line, true, 0);
            assert_eq!(
                blocks,
                vec![Block::Heading {
                    level,
                    text: "Title"
                }]
            );
        }
    }

    #[test]
    fn test_seven_hashes_is_paragraph() {
        assert_eq!(
            parse("####### Title"),
            vec![Block::Paragraph(vec!["####### Title"])]
        );
    }

    #[test]
    fn test_hash_without_space_is_paragraph() {
        assert_eq!(parse("#tag"), vec![Block::Paragraph(vec!["#tag"])]);
    }

    #[test]
    fn test_rule() {
        assert_eq!(parse("---"), vec![Block::Rule]);
        assert_eq!(parse("  -----  "), vec![Block::Rule]);
        assert_eq!(parse("--"), vec![Block::Paragraph(vec!["--"])]);
        assert_eq!(parse("--- x"), vec![Block::Paragraph(vec!["--- x"])]);
    }

    #[test]
    fn test_paragraphs_split_on_blank_line() {
        assert_eq!(
            parse("a\nb\n\nc"),
            vec![
                Block::Paragraph(vec!["a", "b"]),
                Block::Paragraph(vec!["c"])
            ]
        );
    }

    #[test]
    fn test_blank_only_input_has_no_blocks() {
        assert!(parse("\n  \n\t\n").is_empty());
    }

    #[test]
    fn test_list_run_ends_at_non_list_line() {
        let blocks = parse("- a\n- b\ntext\n- c");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[0], Block::List(items) if items.len() == 2));
        assert_eq!(blocks[1], Block::Paragraph(vec!["text"]));
        assert!(matches!(&blocks[2], Block::List(items) if items.len() == 1));
    }

    #[test]
    fn test_list_keeps_mixed_kinds_in_one_run() {
        let blocks = parse("- a\n1. b");
        let Block::List(items) = &blocks[0] else {
            panic!("expected list, got {blocks:?}");
        };
        assert_eq!(items[0].kind, ListKind::Unordered);
        assert_eq!(items[1].kind, ListKind::Ordered);
    }

    #[test]
    fn test_paragraph_then_list_without_blank_line() {
        let blocks = parse("Intro:\n- a");
        assert_eq!(blocks[0], Block::Paragraph(vec!["Intro:"]));
        assert!(matches!(&blocks[1], Block::List(_)));
    }

    #[test]
    fn test_blockquote_merges_lines() {
        assert_eq!(
            parse("> one\n> two\nafter"),
            vec![
                Block::Blockquote("one\ntwo".to_owned()),
                Block::Paragraph(vec!["after"])
            ]
        );
    }

    #[test]
    fn test_blockquote_keeps_nested_marker() {
        assert_eq!(
            parse(">> deep"),
            vec![Block::Blockquote("> deep".to_owned())]
        );
    }

    #[test]
    fn test_blockquote_past_max_nesting_is_text() {
        assert_eq!(
            parse_blocks("> x", true, MAX_NESTING),
            vec![Block::Paragraph(vec!["> x"])]
        );
    }

    #[test]
    fn test_table_block() {
        let blocks = parse("| a | b |\n|---|---|\n| 1 | 2 |\nafter");
        assert!(matches!(&blocks[0], Block::Table(t) if t.rows.len() == 1));
        assert_eq!(blocks[1], Block::Paragraph(vec!["after"]));
    }

    #[test]
    fn test_table_disabled_without_gfm() {
        let blocks = parse_blocks("| a |\n|---|", false, 0);
        assert_eq!(blocks, vec![Block::Paragraph(vec!["| a |", "|---|"])]);
    }

    #[test]
    fn test_code_token_is_own_block() {
        let token = "\u{FDD0}B0\u{FDD1}";
        let text = format!("before\n{token}\nafter");
        let blocks = parse_blocks(&text, true, 0);
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec!["before"]),
                Block::Code(token),
                Block::Paragraph(vec!["after"])
            ]
        );
    }
}
