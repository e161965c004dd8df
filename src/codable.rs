//! The capability protocol: self-describing encode and decode.
//!
//! A type opts into the codec by implementing [`Codable`]: `populate` writes
//! the value into an [`EncodeNode`] sink, `absorb` reads it back out of a
//! [`DecodeNode`] source. The core recurses into arbitrary record types
//! through this trait with no compile-time knowledge of their fields.
//!
//! Dispatch is resolved at compile time: primitives and `Vec<T>` ship with
//! impls here (routed through the [`Scalar`] codec and the sequence path),
//! and record types implement the trait over their own fields. Every
//! encodable value is one of those — there is no third path.
//!
//! ## Implementing a record
//!
//! ```rust
//! use codable::{Codable, DecodeNode, EncodeNode, Result};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct PhoneNumber {
//!     country: i32,
//!     number: i64,
//! }
//!
//! impl Codable for PhoneNumber {
//!     fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
//!         node.field("country", &self.country)?;
//!         node.field("number", &self.number)
//!     }
//!
//!     fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
//!         self.country = node.field("country")?;
//!         self.number = node.field("number")?;
//!         Ok(())
//!     }
//! }
//!
//! let text = codable::to_string(&PhoneNumber { country: 123, number: 456789 }).unwrap();
//! assert_eq!(text, r#"{"country": 123,"number": 456789}"#);
//! assert_eq!(
//!     codable::from_str::<PhoneNumber>(&text).unwrap(),
//!     PhoneNumber { country: 123, number: 456789 },
//! );
//! ```

use crate::arena::NodeKind;
use crate::decode::DecodeNode;
use crate::encode::EncodeNode;
use crate::scalar::Scalar;
use crate::{Error, Result};

/// The self-describing encode/decode contract.
///
/// `Default` is required because decoding is absorb-into: sequences of
/// records construct a default element for each child and let it absorb,
/// and keyed decode does the same for the matched child.
pub trait Codable: Default {
    /// The node kind this type encodes as.
    ///
    /// Defaults to [`NodeKind::Record`]; the built-in primitive and
    /// sequence impls override it. The encoder presets a node's kind from
    /// this before `populate` runs, which is what makes an empty record
    /// render as `{}` rather than an empty literal.
    fn kind() -> NodeKind {
        NodeKind::Record
    }

    /// Writes this value into the sink node.
    ///
    /// # Errors
    ///
    /// Implementations propagate errors from the fields they encode.
    fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()>;

    /// Reads this value out of the source node.
    ///
    /// # Errors
    ///
    /// Implementations propagate [`Error::MissingField`] and
    /// [`Error::Malformed`] from the fields they decode, unless they opt
    /// into recovery with [`DecodeNode::field_or`].
    fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()>;
}

// One generic integer codec: every width funnels through Scalar::parse_int
// and narrows with try_from, so out-of-range input is malformed rather than
// silently truncated.
macro_rules! integer_codable {
    ($($ty:ty),* $(,)?) => {$(
        impl Codable for $ty {
            fn kind() -> NodeKind {
                NodeKind::Scalar
            }

            fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
                node.set_scalar(*self);
                Ok(())
            }

            fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
                let wide = Scalar::parse_int(node.text())?;
                *self = <$ty>::try_from(wide)
                    .map_err(|_| Error::malformed(stringify!($ty), node.text()))?;
                Ok(())
            }
        }
    )*};
}

integer_codable!(i8, i16, i32, i64, u8, u16, u32);

impl Codable for bool {
    fn kind() -> NodeKind {
        NodeKind::Scalar
    }

    fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
        node.set_scalar(*self);
        Ok(())
    }

    fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
        *self = Scalar::parse_bool(node.text())?;
        Ok(())
    }
}

impl Codable for f64 {
    fn kind() -> NodeKind {
        NodeKind::Scalar
    }

    fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
        node.set_scalar(*self);
        Ok(())
    }

    fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
        *self = Scalar::parse_float(node.text())?;
        Ok(())
    }
}

impl Codable for f32 {
    fn kind() -> NodeKind {
        NodeKind::Scalar
    }

    fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
        node.set_scalar(*self);
        Ok(())
    }

    fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
        *self = Scalar::parse_float(node.text())? as f32;
        Ok(())
    }
}

impl Codable for String {
    fn kind() -> NodeKind {
        NodeKind::Scalar
    }

    fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
        node.set_scalar(self.as_str());
        Ok(())
    }

    fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
        *self = Scalar::parse_text(node.text())?;
        Ok(())
    }
}

impl<T: Codable> Codable for Vec<T> {
    fn kind() -> NodeKind {
        NodeKind::Sequence
    }

    fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
        for item in self {
            node.element(item)?;
        }
        Ok(())
    }

    /// Decodes each child in source order: a default element is constructed
    /// per child and absorbs it. Membership is positional, never keyed.
    fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
        self.clear();
        for child in node.children() {
            let mut item = T::default();
            item.absorb(child)?;
            self.push(item);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{from_str, to_string, Error};

    #[test]
    fn test_primitive_round_trips() {
        assert_eq!(from_str::<bool>(&to_string(&true).unwrap()).unwrap(), true);
        assert_eq!(from_str::<i8>(&to_string(&-8i8).unwrap()).unwrap(), -8);
        assert_eq!(from_str::<u32>(&to_string(&9u32).unwrap()).unwrap(), 9);
        assert_eq!(from_str::<f64>(&to_string(&2.5f64).unwrap()).unwrap(), 2.5);
        assert_eq!(
            from_str::<String>(&to_string(&"hi".to_string()).unwrap()).unwrap(),
            "hi"
        );
    }

    #[test]
    fn test_narrowing_is_checked() {
        // 300 parses as i64 but does not fit u8.
        let err = from_str::<u8>("300").unwrap_err();
        assert_eq!(err, Error::malformed("u8", "300"));
    }

    #[test]
    fn test_negative_into_unsigned_is_malformed() {
        assert!(from_str::<u16>("-1").is_err());
    }

    #[test]
    fn test_vec_round_trip_preserves_order() {
        let items = vec![3i64, 1, 2];
        let text = to_string(&items).unwrap();
        assert_eq!(text, "[3,1,2]");
        assert_eq!(from_str::<Vec<i64>>(&text).unwrap(), items);
    }

    #[test]
    fn test_nested_vec() {
        let items = vec![vec![1i64, 2], vec![], vec![3]];
        let text = to_string(&items).unwrap();
        assert_eq!(text, "[[1,2],[],[3]]");
        assert_eq!(from_str::<Vec<Vec<i64>>>(&text).unwrap(), items);
    }

    #[test]
    fn test_absorb_replaces_existing_elements() {
        use crate::Decoder;
        use crate::Codable;

        let mut items = vec![9i64, 9, 9];
        let decoder = Decoder::parse("[1,2]").unwrap();
        items.absorb(decoder.root()).unwrap();
        assert_eq!(items, vec![1, 2]);
    }
}
