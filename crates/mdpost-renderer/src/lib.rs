//! Markdown to HTML conversion for blog posts.
//!
//! This crate provides a [`MarkdownConverter`] that turns post Markdown into
//! an HTML fragment, plus the small text helpers used around it (excerpts and
//! URL slugs).
//!
//! # Architecture
//!
//! Conversion runs in stages over a working string:
//! - Fenced code blocks, then inline code spans, are swapped for opaque
//!   placeholder tokens so later stages never see their contents.
//! - The remaining text is split into blocks (headings, rules, tables,
//!   lists, blockquotes, paragraphs).
//! - Emphasis, images and links are substituted inside each text node.
//! - Placeholders are restored, code blocks first.
//!
//! Output is deterministic and never panics, whatever the input.
//!
//! # Example
//!
//! ```
//! use mdpost_renderer::MarkdownConverter;
//!
//! let html = MarkdownConverter::new()
//!     .with_table_class("post-table")
//!     .convert("# Hello\n\n**Bold** text");
//! assert_eq!(html, "<h1>Hello</h1>\n<p><strong>Bold</strong> text</p>");
//! ```

mod block;
mod converter;
mod excerpt;
mod fence;
mod html;
mod inline;
mod list;
mod placeholder;
mod slug;
mod table;

pub use converter::{DEFAULT_TABLE_CLASS, MarkdownConverter, convert};
pub use excerpt::{DEFAULT_EXCERPT_LENGTH, extract_text, truncate};
pub use html::escape_html;
pub use slug::{category_url, post_url, slugify};
