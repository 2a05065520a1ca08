//! Lexical path normalization.
//!
//! This module provides the pure string transforms behind [`Path`]:
//! - Collapsing runs of separators into a single separator
//! - Stripping trailing separators (the root stays `/`)
//! - Locating the start offset of every name
//! - Joining raw segments the way a filesystem's path factory does
//!
//! Nothing here consults storage, and `.`/`..` are never interpreted.
//!
//! [`Path`]: crate::path::Path

use std::borrow::Cow;

use crate::error::{Error, Result};

/// The path separator.
pub const SEPARATOR: char = '/';

/// Returns `true` if `raw` is already in normalized form.
///
/// # Examples
///
/// ```
/// use pathfs::path::normalize::is_normalized;
///
/// assert!(is_normalized(""));
/// assert!(is_normalized("a/b"));
/// assert!(!is_normalized("a//b"));
/// assert!(!is_normalized("a/b/"));
/// ```
#[must_use]
pub fn is_normalized(raw: &str) -> bool {
    !raw.contains("//") && (raw.is_empty() || !raw.ends_with(SEPARATOR))
}

/// Normalize a raw path string.
///
/// Borrows the input when it is already normalized.
///
/// # Examples
///
/// ```
/// use pathfs::path::normalize::normalize;
///
/// assert_eq!(normalize(""), "");
/// assert_eq!(normalize("/"), "/");
/// assert_eq!(normalize("a//b/"), "a/b");
/// assert_eq!(normalize("///a//"), "/a");
/// assert_eq!(normalize("foo/../.."), "foo/../..");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> Cow<'_, str> {
    if let Some(index) = raw.find("//") {
        return Cow::Owned(collapse(raw, index));
    }

    if raw.is_empty() || !raw.ends_with(SEPARATOR) {
        return Cow::Borrowed(raw);
    }

    Cow::Owned(collapse(raw, raw.len() - 1))
}

/// Rewrite `input` starting at `start_from`, the first byte that may need
/// rewriting. Everything before it is copied verbatim.
fn collapse(input: &str, start_from: usize) -> String {
    let trimmed = input.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        return SEPARATOR.to_string();
    }

    let (head, tail) = trimmed.split_at(start_from.min(trimmed.len()));
    let mut result = String::with_capacity(trimmed.len());
    result.push_str(head);

    let mut previous = None;
    for c in tail.chars() {
        if c == SEPARATOR && previous == Some(SEPARATOR) {
            continue;
        }
        result.push(c);
        previous = Some(c);
    }

    result
}

/// Compute the start offset of every name in a normalized string.
///
/// The empty string is a single zero-length name; the root has none.
///
/// # Examples
///
/// ```
/// use pathfs::path::normalize::name_offsets;
///
/// assert_eq!(&*name_offsets("/dir/folder.txt"), &[1, 5]);
/// assert_eq!(&*name_offsets(""), &[0]);
/// assert!(name_offsets("/").is_empty());
/// ```
#[must_use]
pub fn name_offsets(normalized: &str) -> Box<[usize]> {
    if normalized.is_empty() {
        return Box::new([0]);
    }

    let bytes = normalized.as_bytes();
    let mut offsets = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'/' {
            index += 1;
            continue;
        }

        offsets.push(index);
        index += 1;
        while index < bytes.len() && bytes[index] != b'/' {
            index += 1;
        }
    }

    offsets.into_boxed_slice()
}

/// Reject input that can never name a file.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `raw` contains a NUL character.
pub fn validate(raw: &str) -> Result<()> {
    if raw.contains('\0') {
        return Err(Error::InvalidPath {
            path: raw.replace('\0', "\\0"),
            reason: "path contains a NUL character".to_string(),
        });
    }
    Ok(())
}

/// Join raw segments into one raw path string.
///
/// Empty segments are skipped and the rest are separated by a single `/`,
/// so `join_segments("", &["/"])` is `"/"` and `join_segments("a", &["", "b"])`
/// is `"a/b"`. The result is not normalized.
///
/// # Examples
///
/// ```
/// use pathfs::path::normalize::join_segments;
///
/// assert_eq!(join_segments("a", &["/b/"]), "a//b/");
/// assert_eq!(join_segments("/", &[""]), "/");
/// assert_eq!(join_segments("", &["x"]), "x");
/// ```
#[must_use]
pub fn join_segments(first: &str, more: &[&str]) -> String {
    if more.is_empty() {
        return first.to_string();
    }

    let capacity = first.len() + more.iter().map(|s| s.len() + 1).sum::<usize>();
    let mut joined = String::with_capacity(capacity);
    joined.push_str(first);
    for segment in more.iter().filter(|s| !s.is_empty()) {
        if !joined.is_empty() {
            joined.push(SEPARATOR);
        }
        joined.push_str(segment);
    }
    joined
}
