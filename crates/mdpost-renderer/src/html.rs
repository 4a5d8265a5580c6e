//! HTML markup helpers.
//!
//! Escaping plus the fixed markup the converter emits for code blocks,
//! images and links.

use std::borrow::Cow;
use std::fmt::Write;

/// Attributes added to links that open in a new tab.
const EXTERNAL_LINK_ATTRS: &str = r#" target="_blank" rel="noopener noreferrer""#;

/// Escape the five HTML-significant characters.
///
/// Borrows the input when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use mdpost_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b"), "a &lt; b");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Write a fenced code block. The content is escaped, the language tag too.
pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    if let Some(lang) = lang {
        write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        )
        .unwrap();
    } else {
        write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
    }
}

/// Write an inline code span.
pub(crate) fn inline_code(content: &str, out: &mut String) {
    write!(out, "<code>{}</code>", escape_html(content)).unwrap();
}

/// Write an image around already-escaped alt text.
///
/// The source is passed through verbatim, like link targets.
pub(crate) fn image(src: &str, alt: &str, out: &mut String) {
    write!(out, r#"<img src="{src}" alt="{alt}">"#).unwrap();
}

/// Write a link around already-rendered label HTML.
pub(crate) fn link(href: &str, label: &str, external: bool, out: &mut String) {
    let attrs = if external { EXTERNAL_LINK_ATTRS } else { "" };
    write!(out, r#"<a href="{href}"{attrs}>{label}</a>"#).unwrap();
}
