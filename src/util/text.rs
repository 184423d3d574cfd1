//! Free-text normalization for feed fields.
//!
//! Feed titles and descriptions routinely carry inline HTML and encoded
//! entities. Everything rendered into a post goes through [`normalize`]
//! first: tags removed, entities decoded, whitespace collapsed. These
//! functions are pure and deterministic.

use std::borrow::Cow;

/// Single-character truncation marker appended by [`summarize`].
const ELLIPSIS: char = '…';

/// Remove all markup tags from `s`, leaving no placeholder behind.
///
/// A simple in-tag scan: everything between `<` and the next `>` is dropped,
/// including the delimiters. An unterminated tag swallows the rest of the
/// string, matching the usual lenient treatment of broken feed markup.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Trim and collapse every internal whitespace run (spaces, tabs, newlines,
/// and Unicode whitespace such as non-breaking spaces) into a single space.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize free text for display: strip tags, decode entities, trim, and
/// collapse whitespace.
///
/// Tags are stripped before entities are decoded, so encoded markup like
/// `&lt;b&gt;` survives as literal text rather than being treated as a tag.
pub fn normalize(s: &str) -> String {
    let stripped = strip_tags(s);
    let decoded: Cow<'_, str> = html_escape::decode_html_entities(&stripped);
    collapse_whitespace(&decoded)
}

/// Normalize `s` and truncate it to at most `limit` characters, appending a
/// single `…` when truncation occurred. Input that fits is returned
/// unchanged after normalization.
pub fn summarize(s: &str, limit: usize) -> String {
    let text = normalize(s);
    if text.chars().count() > limit {
        let mut out: String = text.chars().take(limit).collect();
        out.push(ELLIPSIS);
        out
    } else {
        text
    }
}
