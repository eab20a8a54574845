//! Bounded text for fixed-width record fields
//!
//! Every text field in a store file occupies a fixed number of bytes and is
//! NUL-terminated inside that space. `FixedText<N>` carries the capacity `N`
//! (terminator included) in its type and refuses values that would not fit,
//! so encoding never has to truncate.
//!
//! Stored bytes need not be UTF-8. They are kept as read and written back
//! unchanged; only the displayed text is decoded lossily.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a value cannot live in a fixed-width text field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("text is {len} bytes, at most {max} allowed")]
    TooLong { len: usize, max: usize },

    #[error("text contains a NUL byte")]
    ContainsNul,

    #[error("field is not NUL-terminated")]
    Unterminated,
}

/// A string of at most `N - 1` bytes, storable in an `N`-byte field
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FixedText<const N: usize> {
    /// Field bytes up to the terminator
    raw: Vec<u8>,
    /// `raw` decoded, with invalid sequences replaced
    text: String,
}

impl<const N: usize> FixedText<N> {
    /// Largest number of bytes the text itself may occupy
    pub const MAX_LEN: usize = N - 1;

    /// Validate and wrap a value
    pub fn new(value: impl Into<String>) -> Result<Self, TextError> {
        let text = value.into();
        if text.len() > Self::MAX_LEN {
            return Err(TextError::TooLong {
                len: text.len(),
                max: Self::MAX_LEN,
            });
        }
        if text.contains('\0') {
            return Err(TextError::ContainsNul);
        }
        Ok(Self {
            raw: text.as_bytes().to_vec(),
            text,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The stored bytes, excluding the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Number of stored bytes (excluding the terminator)
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Number of characters in the displayed text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Encode into an `N`-byte field: stored bytes, then zero fill
    pub fn to_field(&self) -> [u8; N] {
        let mut field = [0u8; N];
        field[..self.raw.len()].copy_from_slice(&self.raw);
        field
    }

    /// Decode an `N`-byte field, reading up to the first NUL
    ///
    /// Bytes after the terminator are padding and ignored.
    pub fn from_field(field: &[u8]) -> Result<Self, TextError> {
        let window = &field[..field.len().min(N)];
        let end = window
            .iter()
            .position(|&b| b == 0)
            .ok_or(TextError::Unterminated)?;
        let raw = window[..end].to_vec();
        let text = String::from_utf8_lossy(&raw).into_owned();
        Ok(Self { raw, text })
    }
}

impl<const N: usize> TryFrom<String> for FixedText<N> {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> TryFrom<&str> for FixedText<N> {
    type Error = TextError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> From<FixedText<N>> for String {
    fn from(text: FixedText<N>) -> Self {
        text.text
    }
}

impl<const N: usize> fmt::Display for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.text)
    }
}

impl<const N: usize> PartialEq<str> for FixedText<N> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}
