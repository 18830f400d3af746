//! Fixed-capacity string payload stored inline in every entry.

use core::fmt;

/// Size of the payload buffer in the original on-disk/in-memory layout,
/// including the terminator byte.
pub const KEY_CAPACITY: usize = 128;

/// Longest key, in bytes, that a table stores without truncation.
pub const MAX_KEY_LEN: usize = KEY_CAPACITY - 1;

/// What `insert` does with keys longer than [`MAX_KEY_LEN`] bytes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Overlong {
    /// Keep the longest prefix that fits, cut on a UTF-8 character boundary.
    #[default]
    Truncate,
    /// Fail the insert with `TableError::KeyTooLong`.
    Reject,
}

/// Inline bounded string. Always holds valid UTF-8 of at most
/// `MAX_KEY_LEN` bytes.
#[derive(Copy, Clone)]
pub(crate) struct Payload {
    len: u8,
    buf: [u8; MAX_KEY_LEN],
}

impl Payload {
    /// Copies `key` into a payload. The returned flag is true when the key had
    /// to be shortened.
    pub(crate) fn new(key: &str) -> (Self, bool) {
        let kept = truncate(key);
        let mut buf = [0u8; MAX_KEY_LEN];
        buf[..kept.len()].copy_from_slice(kept.as_bytes());
        let payload = Payload {
            // kept.len() <= MAX_KEY_LEN < 256
            len: kept.len() as u8,
            buf,
        };
        (payload, kept.len() != key.len())
    }

    #[inline]
    pub(crate) fn as_str(&self) -> &str {
        let bytes = &self.buf[..usize::from(self.len)];
        debug_assert!(core::str::from_utf8(bytes).is_ok());
        // SAFETY: `new` only copies a prefix of a `&str` that ends on a char
        // boundary, and the buffer is never written afterwards.
        unsafe { core::str::from_utf8_unchecked(bytes) }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Longest prefix of `key` that fits in a payload.
///
/// For ASCII this is a plain cut at `MAX_KEY_LEN` bytes; multi-byte
/// characters straddling the limit are dropped whole.
pub fn truncate(key: &str) -> &str {
    if key.len() <= MAX_KEY_LEN {
        return key;
    }
    let mut end = MAX_KEY_LEN;
    while !key.is_char_boundary(end) {
        end -= 1;
    }
    &key[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_keys_are_copied_verbatim() {
        let (p, truncated) = Payload::new("cat");
        assert_eq!(p.as_str(), "cat");
        assert!(!truncated);

        let (p, truncated) = Payload::new("");
        assert_eq!(p.as_str(), "");
        assert!(!truncated);
    }

    #[test]
    fn key_at_limit_is_not_truncated() {
        let key = "x".repeat(MAX_KEY_LEN);
        let (p, truncated) = Payload::new(&key);
        assert_eq!(p.as_str(), key);
        assert!(!truncated);
    }

    #[test]
    fn ascii_overflow_is_cut_at_limit() {
        let key = "a".repeat(200);
        let (p, truncated) = Payload::new(&key);
        assert!(truncated);
        assert_eq!(p.as_str().len(), MAX_KEY_LEN);
        assert_eq!(p.as_str(), &key[..MAX_KEY_LEN]);
    }

    /// Invariant: truncation never splits a multi-byte character.
    #[test]
    fn multibyte_char_on_limit_is_dropped_whole() {
        // 126 ASCII bytes followed by a 2-byte 'é' spanning bytes 126..128.
        let key = format!("{}é", "a".repeat(MAX_KEY_LEN - 1));
        assert_eq!(key.len(), MAX_KEY_LEN + 1);
        let kept = truncate(&key);
        assert_eq!(kept.len(), MAX_KEY_LEN - 1);
        assert!(kept.bytes().all(|b| b == b'a'));

        let (p, truncated) = Payload::new(&key);
        assert!(truncated);
        assert_eq!(p.as_str(), kept);
    }

    #[test]
    fn debug_shows_contents() {
        let (p, _) = Payload::new("dog");
        assert_eq!(format!("{p:?}"), "\"dog\"");
    }
}
