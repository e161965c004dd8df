//! Error types for encoding and decoding.
//!
//! The original design of this codec had no error channel at all: a missing
//! key or a malformed literal silently collapsed into the caller's default
//! value. This crate keeps default substitution available, but as an opt-in
//! recovery policy ([`DecodeNode::field_or`]), so "legitimately zero" and
//! "not found" stay distinguishable.
//!
//! ## Error Categories
//!
//! - [`Error::MissingField`]: a keyed lookup found no matching child
//! - [`Error::Malformed`]: a scalar literal failed to parse as the requested
//!   primitive kind
//! - [`Error::TooDeep`]: input nesting exceeded the parser's recursion limit
//!
//! ## Examples
//!
//! ```rust
//! use codable::{Decoder, Error};
//!
//! let decoder = Decoder::parse(r#"{"a": 1}"#).unwrap();
//! let missing = decoder.root().field::<i64>("b");
//! assert!(matches!(missing, Err(Error::MissingField { .. })));
//! ```
//!
//! [`DecodeNode::field_or`]: crate::DecodeNode::field_or

use thiserror::Error;

/// All errors that can occur during encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A keyed lookup found no child with the requested key.
    #[error("missing field: no child with key `{key}`")]
    MissingField {
        /// The key that was looked up.
        key: String,
    },

    /// A scalar literal could not be parsed as the requested primitive kind.
    #[error("malformed literal: expected {expected}, found `{found}`")]
    Malformed {
        /// The primitive kind the caller asked for.
        expected: &'static str,
        /// The literal text that failed to parse.
        found: String,
    },

    /// Input nesting exceeded the parser's recursion limit.
    #[error("input nesting exceeds the recursion limit of {limit}")]
    TooDeep {
        /// The fixed nesting limit that was exceeded.
        limit: usize,
    },
}

impl Error {
    /// Creates a missing-field error for the given key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use codable::Error;
    ///
    /// let err = Error::missing_field("phone");
    /// assert!(err.to_string().contains("phone"));
    /// ```
    pub fn missing_field(key: &str) -> Self {
        Error::MissingField {
            key: key.to_string(),
        }
    }

    /// Creates a malformed-literal error recording what was expected and
    /// what the input actually contained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use codable::Error;
    ///
    /// let err = Error::malformed("integer", "abc");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn malformed(expected: &'static str, found: &str) -> Self {
        Error::Malformed {
            expected,
            found: found.to_string(),
        }
    }

    /// Returns `true` if this error is recoverable by default substitution.
    ///
    /// Only [`Error::MissingField`] qualifies; a malformed literal is real
    /// data that failed to parse and always propagates.
    #[inline]
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Error::MissingField { .. })
    }
}

/// Alias for `std::result::Result` with this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
