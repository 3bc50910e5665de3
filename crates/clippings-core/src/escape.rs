// SPDX-License-Identifier: GPL-2.0-or-later
//! Viki markup escaping for captured text
//!
//! Highlights and notes are user text. Every sequence viki would read as
//! markup gets a backslash in front of it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Characters and two-character sequences significant anywhere in a line
static INLINE_MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[${}`]|::|__|''").unwrap());

/// List, heading and comment markers at the start of a line
static LINE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)(\*+|#\S|(?:\d+|[A-Za-z?])\.[ \t]|[%#@?-][ \t])").unwrap()
});

/// Escape text for a viki page.
///
/// - `$`, `{`, `}`, `` ` ``, `::`, `__` and `''` anywhere
/// - at line start, after indentation: runs of `*`, `#` followed by a
///   non-space, ordinals like `1.` or `a.` followed by a space, and any of
///   `% # @ ? -` followed by a space
pub fn escape_viki(text: &str) -> String {
    let inline = INLINE_MARKUP.replace_all(text, |caps: &Captures| format!("\\{}", &caps[0]));
    LINE_MARKER
        .replace_all(&inline, |caps: &Captures| format!("{}\\{}", &caps[1], &caps[2]))
        .into_owned()
}
