//! Shared text and path helpers.
//!
//! File tools count in characters rather than bytes so offsets handed to a
//! model stay valid for multibyte text.

use std::path::{Component, Path, PathBuf};

/// Slice of `s` starting at character `offset`, at most `max_chars` long.
///
/// An offset past the end yields an empty slice.
pub fn char_window(s: &str, offset: usize, max_chars: usize) -> &str {
    let start = byte_index(s, offset);
    let rest = &s[start..];
    let end = byte_index(rest, max_chars);
    &rest[..end]
}

/// Byte index of the `n`th character, clamped to the string length.
fn byte_index(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

/// Single-line preview of at most `max_chars` characters, for logs and the
/// console. Newlines are flattened and an ellipsis marks truncation.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let flat = flat.trim();
    if flat.chars().count() <= max_chars {
        return flat.to_string();
    }
    format!("{}...", char_window(flat, 0, max_chars.saturating_sub(3)))
}

/// Lexical normalization: `.` segments are removed and `..` pops the
/// previous segment (dropped at the root). The filesystem is not touched.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_ascii() {
        assert_eq!(char_window("hello world", 6, 5), "world");
        assert_eq!(char_window("hello", 0, 100), "hello");
    }

    #[test]
    fn window_past_end_is_empty() {
        assert_eq!(char_window("hello", 10, 5), "");
    }

    #[test]
    fn window_multibyte() {
        let s = "あのね";
        assert_eq!(char_window(s, 1, 1), "の");
        assert_eq!(char_window(s, 0, 2), "あの");
    }

    #[test]
    fn preview_flattens_and_truncates() {
        assert_eq!(preview("line one\nline two", 100), "line one line two");
        assert_eq!(preview("hello world", 8), "hello...");
        assert_eq!(preview("short", 8), "short");
    }

    #[test]
    fn normalize_removes_dot_segments() {
        assert_eq!(
            normalize_path(Path::new("/work/demo/docs/../GUIDE.md")),
            PathBuf::from("/work/demo/GUIDE.md")
        );
        assert_eq!(
            normalize_path(Path::new("/work/./demo/../../../etc")),
            PathBuf::from("/etc")
        );
    }
}
