// SPDX-License-Identifier: GPL-2.0-or-later
//! Title helpers shared by every exporter

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing `(Author)` group of a title line
static AUTHOR_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)$").unwrap());

const UNSAFE_CHARS: &[char] = &['.', '+', '*', ':', '"', '?', '<', '>', '|', '&', '\\', '/', '%'];

/// Turn a title into a filename stem.
///
/// Control characters and `. + * : " ? < > | & \ / %` become `_`.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_control() || UNSAFE_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// `<sanitized title>.<extension>`
pub fn file_name(title: &str, extension: &str) -> String {
    format!("{}.{}", sanitize_title(title), extension)
}

/// Split `"Book (Author)"` into `("Book ", "Author")`.
///
/// Whitespace before the parenthetical stays with the title. Without a
/// trailing parenthetical the author is empty and the title is unchanged.
pub fn split_author(title: &str) -> (&str, &str) {
    match AUTHOR_SUFFIX.captures(title) {
        Some(caps) => {
            let start = caps.get(0).map_or(title.len(), |group| group.start());
            let author = caps.get(1).map_or("", |author| author.as_str());
            (&title[..start], author)
        }
        None => (title, ""),
    }
}
