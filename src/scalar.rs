//! The primitive codec.
//!
//! [`Scalar`] is a closed sum over the primitive kinds the text format can
//! carry: boolean, integer, float, and text. All primitive rendering and
//! parsing lives here, once; the per-type [`Codable`] impls in
//! [`crate::codable`] are thin conversions into and out of this enum rather
//! than a ladder of near-identical overloads.
//!
//! ## Rendering
//!
//! Numbers use their natural decimal `Display` form with no fixed precision
//! guarantee. Text is wrapped in double quotes with no escape processing;
//! a value containing `"` will not survive a round-trip. Both are known
//! limitations of the format itself.
//!
//! ## Parsing
//!
//! Parsing is strict per kind and reports [`Error::Malformed`] instead of
//! handing back garbage: booleans must be exactly `true` or `false`,
//! integers must parse and fit the target width, text must be
//! double-quoted.
//!
//! [`Codable`]: crate::Codable
//! [`Error::Malformed`]: crate::Error::Malformed

use crate::{Error, Result};
use std::fmt;

/// A primitive value in one of the format's four scalar kinds.
///
/// # Examples
///
/// ```rust
/// use codable::Scalar;
///
/// assert_eq!(Scalar::from(42).render(), "42");
/// assert_eq!(Scalar::from(true).render(), "true");
/// assert_eq!(Scalar::from("hi").render(), "\"hi\"");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Renders this value as its literal text, quoted if textual.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Parses a boolean literal.
    ///
    /// # Errors
    ///
    /// Anything other than exactly `true` or `false` is malformed.
    pub fn parse_bool(text: &str) -> Result<bool> {
        match text {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(Error::malformed("boolean", other)),
        }
    }

    /// Parses an integer literal as `i64`.
    pub fn parse_int(text: &str) -> Result<i64> {
        text.parse::<i64>()
            .map_err(|_| Error::malformed("integer", text))
    }

    /// Parses a floating-point literal as `f64`.
    pub fn parse_float(text: &str) -> Result<f64> {
        text.parse::<f64>()
            .map_err(|_| Error::malformed("float", text))
    }

    /// Parses a quoted text literal, stripping the surrounding quotes.
    ///
    /// No escape sequences are recognized; the span between the quotes is
    /// taken verbatim.
    pub fn parse_text(text: &str) -> Result<String> {
        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            Ok(text[1..text.len() - 1].to_string())
        } else {
            Err(Error::malformed("quoted text", text))
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(fl) => write!(f, "{}", fl),
            Scalar::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i8> for Scalar {
    fn from(value: i8) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<i16> for Scalar {
    fn from(value: i16) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<u8> for Scalar {
    fn from(value: u8) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<u16> for Scalar {
    fn from(value: u16) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(value as f64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_literals() {
        assert_eq!(Scalar::Bool(false).render(), "false");
        assert_eq!(Scalar::Int(-7).render(), "-7");
        assert_eq!(Scalar::Float(3.5).render(), "3.5");
        assert_eq!(Scalar::Text(String::new()).render(), "\"\"");
    }

    #[test]
    fn test_parse_bool_strict() {
        assert_eq!(Scalar::parse_bool("true"), Ok(true));
        assert_eq!(Scalar::parse_bool("false"), Ok(false));
        assert!(Scalar::parse_bool("True").is_err());
        assert!(Scalar::parse_bool("1").is_err());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(Scalar::parse_int("456789"), Ok(456789));
        assert_eq!(Scalar::parse_int("-1"), Ok(-1));
        assert!(Scalar::parse_int("1.5").is_err());
        assert!(Scalar::parse_int("abc").is_err());
        assert!(Scalar::parse_int("").is_err());
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(Scalar::parse_float("3.5"), Ok(3.5));
        assert_eq!(Scalar::parse_float("42"), Ok(42.0));
        assert!(Scalar::parse_float("hi").is_err());
    }

    #[test]
    fn test_parse_text_requires_quotes() {
        assert_eq!(Scalar::parse_text("\"hi\""), Ok("hi".to_string()));
        assert_eq!(Scalar::parse_text("\"\""), Ok(String::new()));
        assert!(Scalar::parse_text("hi").is_err());
        assert!(Scalar::parse_text("\"").is_err());
    }

    #[test]
    fn test_from_ladder() {
        assert_eq!(Scalar::from(42u8), Scalar::Int(42));
        assert_eq!(Scalar::from(42i16), Scalar::Int(42));
        assert_eq!(Scalar::from(2.5f32), Scalar::Float(2.5));
        assert_eq!(Scalar::from("x".to_string()), Scalar::Text("x".to_string()));
    }
}
