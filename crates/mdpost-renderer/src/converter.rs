//! Markdown to HTML fragment conversion.
//!
//! The pipeline is a fixed sequence of pure stages:
//!
//! 1. Extract fenced code blocks into placeholders.
//! 2. Extract inline code spans into placeholders.
//! 3. Split the working text into blocks (headings, rules, tables, lists,
//!    blockquotes, paragraphs).
//! 4. Render each block, running inline substitutions (emphasis, images,
//!    links) on every inline text node.
//! 5. Restore code block placeholders, then inline code placeholders.

use std::borrow::Cow;
use std::fmt::Write;

use crate::block::{self, Block, MAX_NESTING};
use crate::fence;
use crate::inline::{self, InlineOptions};
use crate::list::{self, ListItem, ListKind, TaskMarker};
use crate::placeholder::{self, PlaceholderKind, PlaceholderTable};
use crate::table::Table;

/// Class put on every rendered `<table>` by default.
pub const DEFAULT_TABLE_CLASS: &str = "markdown-table";

/// Markdown to HTML fragment converter.
///
/// Conversion is a pure function of the input and the options: no I/O, no
/// shared mutable state, and the same input always yields the same output.
/// The converter is `Send + Sync` and can be shared between threads.
///
/// # Raw HTML
///
/// Raw HTML outside code passes through unmodified by default. This is an
/// XSS exposure for untrusted input; use [`with_raw_html(false)`](Self::with_raw_html)
/// or sanitize the output before rendering content from untrusted authors.
///
/// # Example
///
/// ```
/// use mdpost_renderer::MarkdownConverter;
///
/// let converter = MarkdownConverter::new().with_external_links(false);
/// let html = converter.convert("# Hello\n\nSee [docs](/docs).");
/// assert_eq!(html, "<h1>Hello</h1>\n<p>See <a href=\"/docs\">docs</a>.</p>");
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownConverter {
    gfm: bool,
    table_class: String,
    external_links: bool,
    raw_html: bool,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter {
    /// Create a converter with GFM, new-tab links and raw HTML passthrough.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            table_class: DEFAULT_TABLE_CLASS.to_owned(),
            external_links: true,
            raw_html: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown extensions.
    ///
    /// GFM is enabled by default. When enabled, the converter supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Set the class attribute of rendered tables. An empty class omits it.
    #[must_use]
    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = class.into();
        self
    }

    /// Open links in a new tab (`target="_blank" rel="noopener noreferrer"`).
    #[must_use]
    pub fn with_external_links(mut self, enabled: bool) -> Self {
        self.external_links = enabled;
        self
    }

    /// Pass raw HTML through (default) or escape it.
    #[must_use]
    pub fn with_raw_html(mut self, enabled: bool) -> Self {
        self.raw_html = enabled;
        self
    }

    /// Convert Markdown to an HTML fragment.
    ///
    /// Total over all strings: empty or blank input yields an empty string,
    /// malformed Markdown yields imperfect HTML, never a panic.
    pub fn convert(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return String::new();
        }

        let source = normalize(markdown);

        let mut code_blocks = PlaceholderTable::new(PlaceholderKind::CodeBlock);
        let text = fence::extract_code_blocks(&source, &mut code_blocks);

        let mut inline_code = PlaceholderTable::new(PlaceholderKind::InlineCode);
        let text = inline::extract_inline_code(&text, &mut inline_code);

        let html = self.render_blocks(&text, 0);

        let html = code_blocks.restore(&html);
        inline_code.restore(&html)
    }

    fn inline_options(&self) -> InlineOptions {
        InlineOptions {
            gfm: self.gfm,
            external_links: self.external_links,
            raw_html: self.raw_html,
        }
    }

    fn inline(&self, text: &str) -> String {
        inline::render_inline(text, self.inline_options())
    }

    /// Render a block sequence, one block per line.
    fn render_blocks(&self, text: &str, depth: usize) -> String {
        let mut out = String::with_capacity(text.len() + text.len() / 2);
        for (idx, block) in block::parse_blocks(text, self.gfm, depth)
            .iter()
            .enumerate()
        {
            if idx > 0 {
                out.push('\n');
            }
            self.render_block(block, depth, &mut out);
        }
        out
    }

    fn render_block(&self, block: &Block<'_>, depth: usize, out: &mut String) {
        match block {
            Block::Heading { level, text } => {
                write!(out, "<h{level}>{}</h{level}>", self.inline(text)).unwrap();
            }
            Block::Rule => out.push_str("<hr>"),
            Block::Code(token) => out.push_str(token),
            Block::Table(table) => self.render_table(table, out),
            Block::List(items) => {
                let mut pos = 0;
                while pos < items.len() {
                    self.render_list(items, &mut pos, 0, out);
                }
            }
            Block::Blockquote(inner) => {
                out.push_str("<blockquote>");
                out.push_str(&self.render_blocks(inner, depth + 1));
                out.push_str("</blockquote>");
            }
            Block::Paragraph(lines) => {
                out.push_str("<p>");
                for (idx, line) in lines.iter().enumerate() {
                    if idx > 0 {
                        out.push_str("<br>");
                    }
                    out.push_str(&self.inline(line));
                }
                out.push_str("</p>");
            }
        }
    }

    fn render_table(&self, table: &Table<'_>, out: &mut String) {
        if self.table_class.is_empty() {
            out.push_str("<table>");
        } else {
            write!(
                out,
                r#"<table class="{}">"#,
                crate::html::escape_html(&self.table_class)
            )
            .unwrap();
        }

        out.push_str("<thead><tr>");
        for (column, cell) in table.header.iter().enumerate() {
            let align = table.alignment(column).style_attr();
            write!(out, "<th{align}>{}</th>", self.inline(cell)).unwrap();
        }
        out.push_str("</tr></thead><tbody>");

        for row in &table.rows {
            out.push_str("<tr>");
            for (column, cell) in row.iter().enumerate() {
                let align = table.alignment(column).style_attr();
                write!(out, "<td{align}>{}</td>", self.inline(cell)).unwrap();
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
    }

    /// Render one list starting at `items[*pos]`.
    ///
    /// Consumes items of the same kind at the same indentation. Deeper items
    /// become nested lists inside the preceding `<li>`. Stops at a shallower
    /// item or a change of kind, leaving it for the caller.
    fn render_list(
        &self,
        items: &[ListItem<'_>],
        pos: &mut usize,
        depth: usize,
        out: &mut String,
    ) {
        let first = &items[*pos];
        let (indent, kind) = (first.indent, first.kind);

        match (kind, first.number) {
            (ListKind::Ordered, Some(start)) if start != 1 => {
                write!(out, r#"<ol start="{start}">"#).unwrap();
            }
            _ => write!(out, "<{}>", kind.tag()).unwrap(),
        }

        while let Some(item) = items.get(*pos) {
            if item.indent < indent || item.kind != kind {
                break;
            }

            out.push_str("<li>");
            self.render_list_item(item.text, out);
            *pos += 1;

            if depth + 1 < MAX_NESTING {
                while items.get(*pos).is_some_and(|next| next.indent > indent) {
                    self.render_list(items, pos, depth + 1, out);
                }
            }
            out.push_str("</li>");
        }

        write!(out, "</{}>", kind.tag()).unwrap();
    }

    fn render_list_item(&self, text: &str, out: &mut String) {
        let text = match list::task_marker(text).filter(|_| self.gfm) {
            Some((TaskMarker::Unchecked, rest)) => {
                out.push_str(r#"<input type="checkbox" disabled> "#);
                rest
            }
            Some((TaskMarker::Checked, rest)) => {
                out.push_str(r#"<input type="checkbox" checked disabled> "#);
                rest
            }
            None => text,
        };
        out.push_str(&self.inline(text));
    }
}

/// Convert Markdown to an HTML fragment with default options.
///
/// # Examples
///
/// ```
/// use mdpost_renderer::convert;
///
/// assert_eq!(convert("**bold**"), "<p><strong>bold</strong></p>");
/// assert_eq!(convert(""), "");
/// ```
pub fn convert(markdown: &str) -> String {
    MarkdownConverter::new().convert(markdown)
}

/// Normalize line endings and strip placeholder sentinels from the input.
fn normalize(markdown: &str) -> Cow<'_, str> {
    let text = placeholder::strip_sentinels(markdown);
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        text
    }
}
