//! # codable
//!
//! A minimal self-describing JSON codec: application record types opt into
//! a two-method capability protocol ([`Codable`]) and the core recurses
//! into them without compile-time knowledge of their fields.
//!
//! ## How it works
//!
//! Encoding and decoding share one model: a tree of nodes (scalar,
//! sequence, or record) stored in an append-only [`arena`] addressed by
//! stable integer handles, one arena per session. The encoder builds the
//! tree bottom-up from typed values and renders JSON text post-order; the
//! decoder builds it by recursive structural splitting of the input text —
//! no tokenizer, no grammar validation.
//!
//! The format is JSON-like but deliberately permissive: whitespace is
//! tolerated only outside quoted spans, escape sequences are not processed,
//! and malformed structure decodes to *something* rather than failing.
//! Strictness lives at the scalar boundary, where a literal that does not
//! parse as the requested primitive is reported as [`Error::Malformed`]
//! instead of collapsing into a default value.
//!
//! ## Quick start
//!
//! ```rust
//! use codable::{from_str, to_string, Codable, DecodeNode, EncodeNode, Result};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Contact {
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! impl Codable for Contact {
//!     fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
//!         node.field("name", &self.name)?;
//!         node.field("tags", &self.tags)
//!     }
//!
//!     fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
//!         self.name = node.field("name")?;
//!         self.tags = node.field_or("tags", Vec::new())?;
//!         Ok(())
//!     }
//! }
//!
//! let contact = Contact {
//!     name: "Eugene".to_string(),
//!     tags: vec!["work".to_string()],
//! };
//! let text = to_string(&contact).unwrap();
//! assert_eq!(text, r#"{"name": "Eugene","tags": ["work"]}"#);
//! assert_eq!(from_str::<Contact>(&text).unwrap(), contact);
//! ```
//!
//! ## Sessions
//!
//! [`Encoder`] and [`Decoder`] each own one arena for their lifetime.
//! Handles never cross sessions; independent sessions share no state, so
//! they may run on separate threads with no coordination.
//!
//! ## Known limitations
//!
//! Carried over from the format's design, not silently fixed:
//!
//! - no escape handling — text containing `"` will not round-trip;
//! - numeric text uses the natural `Display` form with no fixed precision
//!   guarantee;
//! - unbalanced brackets inside quoted text confuse the structural
//!   splitter.

pub mod arena;
pub mod codable;
pub mod decode;
pub mod encode;
pub mod error;
pub mod scalar;

pub use arena::{Arena, Node, NodeId, NodeKind};
pub use codable::Codable;
pub use decode::{DecodeNode, Decoder};
pub use encode::{EncodeNode, Encoder};
pub use error::{Error, Result};
pub use scalar::Scalar;

/// Encodes any `T: Codable` to its JSON text, in a one-shot session.
///
/// # Examples
///
/// ```rust
/// use codable::to_string;
///
/// assert_eq!(to_string(&vec![1, 2, 3]).unwrap(), "[1,2,3]");
/// ```
///
/// # Errors
///
/// Propagates any error raised while populating the tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T: Codable>(value: &T) -> Result<String> {
    Encoder::new().encode(value)
}

/// Decodes a `T: Codable` from JSON text, in a one-shot session.
///
/// # Examples
///
/// ```rust
/// use codable::from_str;
///
/// let numbers: Vec<i64> = from_str("[1, 2, 3]").unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if the input nests too deeply or a scalar literal does
/// not parse as the requested kind.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T: Codable>(text: &str) -> Result<T> {
    Decoder::parse(text)?.decode()
}
