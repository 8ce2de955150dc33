//! UTF-8 validation and char-boundary-safe truncation.
//!
//! Steering files are plain UTF-8. Anything else is rejected by exclusion:
//! the allocator records a `non-utf8` omission and moves on.

use thiserror::Error;

/// Rejection signal for bytes that are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("content is not valid UTF-8 (valid up to byte {valid_up_to})")]
pub struct NonUtf8 {
    /// Length of the longest valid prefix.
    pub valid_up_to: usize,
}

/// Validate raw bytes as UTF-8 without any normalization.
pub fn validate(bytes: Vec<u8>) -> Result<String, NonUtf8> {
    String::from_utf8(bytes).map_err(|err| NonUtf8 {
        valid_up_to: err.utf8_error().valid_up_to(),
    })
}

/// Validate bytes that may stop short of the end of the file.
///
/// When `partial` is set, an incomplete multi-byte sequence at the very end
/// is dropped, since the rest of it lies beyond the read. Any other invalid
/// byte rejects the whole file.
pub fn validate_prefix(mut bytes: Vec<u8>, partial: bool) -> Result<String, NonUtf8> {
    if partial {
        if let Err(err) = std::str::from_utf8(&bytes) {
            if err.error_len().is_none() {
                bytes.truncate(err.valid_up_to());
            }
        }
    }
    validate(bytes)
}

/// Longest prefix of `text` that is at most `max_bytes` long and ends on a
/// char boundary.
pub fn safe_prefix(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Empty or whitespace-only text.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
