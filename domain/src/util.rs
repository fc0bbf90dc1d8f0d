//! Shared utility functions.

use std::borrow::Cow;

/// Shorten a reply for log lines: keep roughly `max_bytes` without splitting
/// a UTF-8 character, appending an ellipsis when anything was dropped.
pub fn preview(s: &str, max_bytes: usize) -> Cow<'_, str> {
    if s.len() <= max_bytes {
        return Cow::Borrowed(s);
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}…", &s[..end]))
}
