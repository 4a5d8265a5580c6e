//! Inline substitutions.
//!
//! Inline code is extracted over the whole working text before blocks are
//! split. Emphasis, images and links then run per inline text node, in a
//! fixed order: `***` before `**` before `*`, images before links.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html;
use crate::placeholder::PlaceholderTable;

static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static BOLD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static STRIKETHROUGH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());
// One level of balanced parentheses belongs to the URL: `(javascript:alert(1))`.
static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\[\]]*)\]\(((?:[^()]|\([^()]*\))*)\)").unwrap()
});
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]+)\]\(((?:[^()]|\([^()]*\))*)\)").unwrap()
});

/// Settings that change inline output.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InlineOptions {
    /// Enable `~~strikethrough~~`.
    pub gfm: bool,
    /// Open links in a new tab.
    pub external_links: bool,
    /// Pass raw HTML through instead of escaping it.
    pub raw_html: bool,
}

/// Replace inline code spans with placeholders.
pub(crate) fn extract_inline_code(text: &str, table: &mut PlaceholderTable) -> String {
    INLINE_CODE
        .replace_all(text, |caps: &Captures<'_>| {
            let mut rendered = String::new();
            html::inline_code(&caps[1], &mut rendered);
            table.insert(rendered)
        })
        .into_owned()
}

/// Render one inline text node.
pub(crate) fn render_inline(text: &str, options: InlineOptions) -> String {
    let text = if options.raw_html {
        Cow::Borrowed(text)
    } else {
        html::escape_html(text)
    };

    let text = BOLD_ITALIC.replace_all(&text, "<strong><em>${1}</em></strong>");
    let text = BOLD.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    let text = if options.gfm {
        STRIKETHROUGH.replace_all(&text, "<del>${1}</del>")
    } else {
        Cow::Borrowed(text.as_ref())
    };

    let text = IMAGE.replace_all(&text, |caps: &Captures<'_>| {
        // Escaped mode already escaped the whole text.
        let alt = if options.raw_html {
            html::escape_html(&caps[1])
        } else {
            Cow::Borrowed(&caps[1])
        };
        let mut out = String::new();
        html::image(&caps[2], &alt, &mut out);
        out
    });
    let text = LINK.replace_all(&text, |caps: &Captures<'_>| {
        let mut out = String::new();
        html::link(&caps[2], &caps[1], options.external_links, &mut out);
        out
    });

    text.into_owned()
}
