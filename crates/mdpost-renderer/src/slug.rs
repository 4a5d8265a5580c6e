//! URL slugs for posts and categories.

use unicode_normalization::UnicodeNormalization;

/// Convert a title to a URL slug.
///
/// Lowercases, decomposes accented letters (NFD) and drops the combining
/// marks, keeps only `a-z`, `0-9` and single hyphens between words.
///
/// # Examples
///
/// ```
/// use mdpost_renderer::slugify;
///
/// assert_eq!(slugify("Olá, Mundo!"), "ola-mundo");
/// assert_eq!(slugify("  Rust -- 2024 Edition "), "rust-2024-edition");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.to_lowercase().nfd() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        }
        // Combining marks and every other character are dropped.
    }

    slug
}

/// URL path of a post page: `/post/{id}/{slug}`.
pub fn post_url(id: &str, title: &str) -> String {
    format!("/post/{id}/{}", slugify(title))
}

/// URL path of a category page: `/category/{id}/{slug}`.
pub fn category_url(id: &str, name: &str) -> String {
    format!("/category/{id}/{}", slugify(name))
}
