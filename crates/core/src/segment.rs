//! Extraction of original post bodies from a text export.
//!
//! An export is a sequence of loosely formatted blocks. Each block carries a
//! fixed header; original posts (as opposed to reblogs) have empty reblog url
//! and reblog name fields:
//!
//! ```text
//! Post id: 1234
//! Reblog url:
//! Reblog name:
//! Title: something
//! Body: <p>Hello</p>
//! Tags: foo, bar
//! ```

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// The body may span lines and stops at the nearest following "Tags:" line.
static POST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Reblog url:\s\nReblog name:\s\nTitle:.+\nBody:\s([\s\S]*?)\nTags:").unwrap()
});

const POST_HEADER: &str = "Post id: ";

/// Lazily yield the raw body of every original post in `text`.
///
/// Blocks missing any of the anchor lines, and reblogs, are skipped silently.
pub fn extract_posts(text: &str) -> impl Iterator<Item = &str> + '_ {
    POST_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Count every post block in `text`, reblogs included.
pub fn count_post_headers(text: &str) -> usize {
    text.matches(POST_HEADER).count()
}

/// Translate `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
