// src/text.rs - Fixed-capacity text for alert descriptions and locations
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Byte capacity of the Alert Text description and location fields
pub const ALERT_TEXT_CAPACITY: usize = 50;

/// Text field of an [`Alert`](crate::Alert), bounded to [`ALERT_TEXT_CAPACITY`] bytes
pub type AlertString = BoundedText<ALERT_TEXT_CAPACITY>;

/// UTF-8 text stored inline with a fixed byte capacity.
///
/// Assignment never fails: input longer than `N` bytes is cut at the last
/// character boundary that fits.
///
/// ```rust
/// use n2k_alert::text::BoundedText;
///
/// let text = BoundedText::<4>::new("bilge");
/// assert_eq!(text.as_str(), "bilg");
/// ```
#[derive(Clone, Copy)]
pub struct BoundedText<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> BoundedText<N> {
    /// Create from `text`, truncating to capacity
    pub fn new(text: &str) -> Self {
        let mut bounded = Self::default();
        bounded.set(text);
        bounded
    }

    /// Replace the contents. Returns `true` if the input had to be truncated.
    pub fn set(&mut self, text: &str) -> bool {
        let mut end = text.len().min(N);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.buf[..end].copy_from_slice(&text.as_bytes()[..end]);
        self.len = end;
        end < text.len()
    }

    /// Build from raw wire bytes.
    ///
    /// Trailing NUL and 0xFF padding is dropped and invalid UTF-8 sequences are
    /// replaced before truncation.
    pub fn from_wire(bytes: &[u8]) -> Self {
        let end = bytes
            .iter()
            .rposition(|b| *b != 0x00 && *b != 0xFF)
            .map_or(0, |i| i + 1);
        Self::new(&String::from_utf8_lossy(&bytes[..end]))
    }

    /// Stored text
    pub fn as_str(&self) -> &str {
        // `set` only ever copies whole characters of a `&str`
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    /// Stored bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when no text is stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum length in bytes
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for BoundedText<N> {
    fn default() -> Self {
        Self { buf: [0; N], len: 0 }
    }
}

impl<const N: usize> PartialEq for BoundedText<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> Eq for BoundedText<N> {}

impl<const N: usize> PartialEq<str> for BoundedText<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<const N: usize> From<&str> for BoundedText<N> {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl<const N: usize> AsRef<str> for BoundedText<N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> Serialize for BoundedText<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, const N: usize> Deserialize<'de> for BoundedText<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::new(&text))
    }
}
