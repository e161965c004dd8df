//! Decoding: structural splitting of raw text into a navigable node tree.
//!
//! The parser is deliberately permissive. There is no tokenizer and no
//! grammar validation; input is normalized and then recursively split on
//! structural characters:
//!
//! 1. **Debeautify** — drop spaces and newlines everywhere outside
//!    double-quoted spans. Quote state toggles on every `"`; escape
//!    sequences are not recognized.
//! 2. **Classify** — `{` opens a record, `[` opens a sequence, anything
//!    else is a scalar. The outer bracket pair is stripped.
//! 3. **Split** — the interior splits on `,` at bracket depth 0 outside
//!    quotes; each segment splits once more on `:` under the same
//!    discipline to peel an optional quoted key off its value.
//! 4. **Recurse** per segment, appending child nodes to the session arena.
//!
//! Malformed input mostly decodes to *something* rather than failing; the
//! strictness lives at the scalar boundary (see [`crate::scalar`]). The one
//! structural error is [`Error::TooDeep`], which caps recursion so that
//! adversarially nested input cannot exhaust the call stack.
//!
//! [`Error::TooDeep`]: crate::Error::TooDeep

use crate::arena::{Arena, Node, NodeId, NodeKind};
use crate::codable::Codable;
use crate::{Error, Result};

/// Nesting limit for the recursive parser.
///
/// Far deeper than any reasonable document, far shallower than the call
/// stack.
pub const MAX_DEPTH: usize = 128;

/// Removes insignificant whitespace: spaces and newlines outside
/// double-quoted spans.
///
/// Idempotent: running it twice is the same as running it once.
///
/// # Examples
///
/// ```rust
/// use codable::decode::debeautify;
///
/// assert_eq!(debeautify("{ \"a\": 1 }"), "{\"a\":1}");
/// assert_eq!(debeautify("\"a b\""), "\"a b\"");
/// ```
#[must_use]
pub fn debeautify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_quotes = false;
    for ch in text.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        }
        if (ch == ' ' || ch == '\n') && !in_quotes {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Splits `text` on `splitter`, counting matches only at bracket depth 0 and
/// outside quotes. Empty segments are dropped.
///
/// # Examples
///
/// ```rust
/// use codable::decode::split_top_level;
///
/// assert_eq!(split_top_level("1,2,3", ','), vec!["1", "2", "3"]);
/// assert_eq!(split_top_level("[1,2],3", ','), vec!["[1,2]", "3"]);
/// assert_eq!(split_top_level("\"a,b\",c", ','), vec!["\"a,b\"", "c"]);
/// ```
#[must_use]
pub fn split_top_level(text: &str, splitter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut in_quotes = false;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '{' | '[' => depth += 1,
            '}' | ']' => depth -= 1,
            '"' => in_quotes = !in_quotes,
            _ => {}
        }
        if depth == 0 && !in_quotes && ch == splitter {
            if i > start {
                parts.push(&text[start..i]);
            }
            start = i + ch.len_utf8();
        }
    }
    if text.len() > start {
        parts.push(&text[start..]);
    }
    parts
}

/// Drops the first and last character of `text`.
///
/// Used both for outer brackets and for the quotes around a key. Applied
/// unconditionally, matching the permissive grammar: the closing character
/// is never verified.
fn strip_outer(text: &str) -> &str {
    let first = text.chars().next().map_or(0, char::len_utf8);
    let last = text.chars().next_back().map_or(0, char::len_utf8);
    if first + last <= text.len() {
        &text[first..text.len() - last]
    } else {
        ""
    }
}

/// Recursively parses one segment into a node, appending it (and its
/// subtree) to the arena.
fn parse_segment(arena: &mut Arena, key: &str, raw: &str, depth: usize) -> Result<NodeId> {
    if depth > MAX_DEPTH {
        return Err(Error::TooDeep { limit: MAX_DEPTH });
    }
    let text = debeautify(raw);

    // Anything too short to contain a bracket pair is a terminal scalar.
    if text.len() < 2 {
        return Ok(arena.append(Node {
            kind: NodeKind::Scalar,
            key: key.to_string(),
            text,
            children: Vec::new(),
        }));
    }

    let (kind, content) = match text.as_bytes()[0] {
        b'{' => (NodeKind::Record, strip_outer(&text).to_string()),
        b'[' => (NodeKind::Sequence, strip_outer(&text).to_string()),
        _ => (NodeKind::Scalar, text),
    };
    let id = arena.append(Node {
        kind,
        key: key.to_string(),
        text: content,
        children: Vec::new(),
    });
    if kind == NodeKind::Scalar {
        return Ok(id);
    }

    let interior = arena.get(id).text.clone();
    for segment in split_top_level(&interior, ',') {
        let pieces = split_top_level(segment, ':');
        // A recognizable key is a colon-separated first piece longer than a
        // single character; its surrounding quotes are stripped. Anything
        // else is a keyless element.
        let (child_key, value) = if pieces.len() > 1 && pieces[0].len() > 1 {
            (strip_outer(pieces[0]), pieces[1])
        } else {
            ("", pieces.first().copied().unwrap_or(""))
        };
        let child = parse_segment(arena, child_key, value, depth + 1)?;
        arena.get_mut(id).children.push(child);
    }
    Ok(id)
}

/// A decoding session owning one arena and exposing the root node.
#[derive(Debug)]
pub struct Decoder {
    arena: Arena,
    root: NodeId,
}

impl Decoder {
    /// Parses `text` into a node tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use codable::Decoder;
    ///
    /// let decoder = Decoder::parse(r#"{"a": 1, "b": "hi"}"#).unwrap();
    /// assert_eq!(decoder.root().field::<i64>("a").unwrap(), 1);
    /// assert_eq!(decoder.root().field::<String>("b").unwrap(), "hi");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooDeep`] when nesting exceeds [`MAX_DEPTH`]. All
    /// other malformed input parses into some tree; strictness is applied
    /// at the scalar boundary during [`Codable::absorb`].
    pub fn parse(text: &str) -> Result<Self> {
        let mut arena = Arena::new();
        let root = parse_segment(&mut arena, "", text, 0)?;
        Ok(Decoder { arena, root })
    }

    /// The root node of the parsed tree.
    #[must_use]
    pub fn root(&self) -> DecodeNode<'_> {
        DecodeNode {
            arena: &self.arena,
            id: self.root,
        }
    }

    /// Decodes the whole tree as a `T`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the value's [`Codable::absorb`].
    pub fn decode<T: Codable>(&self) -> Result<T> {
        self.root().decode()
    }

    /// The arena backing this session.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }
}

/// The read half of the capability protocol: a view of one parsed node.
///
/// Cheap to copy; borrows the session's arena, so it cannot outlive the
/// [`Decoder`] that produced it.
#[derive(Clone, Copy, Debug)]
pub struct DecodeNode<'a> {
    arena: &'a Arena,
    id: NodeId,
}

impl<'a> DecodeNode<'a> {
    /// This node's kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.arena.get(self.id).kind
    }

    /// This node's key; empty for the root and for sequence elements.
    #[must_use]
    pub fn key(&self) -> &'a str {
        &self.arena.get(self.id).key
    }

    /// This node's sliced text: the literal for a scalar, the bracketless
    /// interior for a record or sequence.
    #[must_use]
    pub fn text(&self) -> &'a str {
        &self.arena.get(self.id).text
    }

    /// Iterates over this node's children in source order.
    pub fn children(&self) -> impl Iterator<Item = DecodeNode<'a>> {
        let arena = self.arena;
        self.arena
            .get(self.id)
            .children
            .iter()
            .map(move |&id| DecodeNode { arena, id })
    }

    /// Finds the first child whose key equals `key`.
    ///
    /// Lookup is a linear scan; duplicate keys are not rejected and the
    /// first structural match wins.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<DecodeNode<'a>> {
        self.children().find(|c| c.key() == key)
    }

    /// Decodes this node itself as a `T`.
    ///
    /// This is the keyless path: sequences and records absorb their own
    /// children, scalars parse their own text.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the value's [`Codable::absorb`].
    pub fn decode<T: Codable>(&self) -> Result<T> {
        let mut value = T::default();
        value.absorb(*self)?;
        Ok(value)
    }

    /// Decodes the child under `key` as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] when no child carries the key, or
    /// whatever the value's [`Codable::absorb`] raises.
    pub fn field<T: Codable>(&self, key: &str) -> Result<T> {
        match self.child(key) {
            Some(child) => child.decode(),
            None => Err(Error::missing_field(key)),
        }
    }

    /// Decodes the child under `key`, substituting `default` when the key
    /// is absent.
    ///
    /// This is the explicit recovery policy: only [`Error::MissingField`]
    /// is absorbed. A present-but-malformed literal still propagates, so a
    /// legitimate zero is never conflated with a missing field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] (or any other non-missing error) from
    /// the value's [`Codable::absorb`].
    pub fn field_or<T: Codable>(&self, key: &str, default: T) -> Result<T> {
        match self.field(key) {
            Ok(value) => Ok(value),
            Err(err) if err.is_missing() => Ok(default),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debeautify_strips_outside_quotes_only() {
        assert_eq!(debeautify("{ \"a b\" : 1 }\n"), "{\"a b\":1}");
    }

    #[test]
    fn test_debeautify_idempotent() {
        let once = debeautify("{ \"a\": [1, 2] }");
        assert_eq!(debeautify(&once), once);
    }

    #[test]
    fn test_split_respects_depth_and_quotes() {
        assert_eq!(
            split_top_level("\"a\":{\"b\":1,\"c\":2},\"d\":3", ','),
            vec!["\"a\":{\"b\":1,\"c\":2}", "\"d\":3"]
        );
        assert_eq!(split_top_level("\"x:y\":1", ':'), vec!["\"x:y\"", "1"]);
    }

    #[test]
    fn test_split_drops_empty_segments() {
        assert_eq!(split_top_level(",1,,2,", ','), vec!["1", "2"]);
        assert!(split_top_level("", ',').is_empty());
    }

    #[test]
    fn test_classify_root_kinds() {
        assert_eq!(Decoder::parse("{}").unwrap().root().kind(), NodeKind::Record);
        assert_eq!(
            Decoder::parse("[]").unwrap().root().kind(),
            NodeKind::Sequence
        );
        assert_eq!(Decoder::parse("42").unwrap().root().kind(), NodeKind::Scalar);
        assert_eq!(Decoder::parse("5").unwrap().root().kind(), NodeKind::Scalar);
    }

    #[test]
    fn test_keyless_segments_become_elements() {
        let decoder = Decoder::parse("[1,2,3]").unwrap();
        let keys: Vec<_> = decoder.root().children().map(|c| c.key().to_string()).collect();
        assert_eq!(keys, vec!["", "", ""]);
    }

    #[test]
    fn test_single_char_key_candidate_is_keyless() {
        // The key side of `a:5` is one character, too short to be a quoted
        // key; the segment is treated as a keyless element.
        let decoder = Decoder::parse("{a:5}").unwrap();
        let root = decoder.root();
        let children: Vec<_> = root.children().collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].key(), "");
    }

    #[test]
    fn test_first_match_wins_on_duplicate_keys() {
        let decoder = Decoder::parse(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(decoder.root().field::<i64>("a").unwrap(), 1);
    }

    #[test]
    fn test_depth_guard() {
        let mut text = String::new();
        for _ in 0..(MAX_DEPTH + 2) {
            text.push('[');
        }
        for _ in 0..(MAX_DEPTH + 2) {
            text.push(']');
        }
        assert_eq!(
            Decoder::parse(&text).unwrap_err(),
            Error::TooDeep { limit: MAX_DEPTH }
        );
    }

    #[test]
    fn test_nested_record_text_is_sliced_interior() {
        let decoder = Decoder::parse(r#"{"p": {"x": 1}}"#).unwrap();
        let p = decoder.root().child("p").unwrap();
        assert_eq!(p.kind(), NodeKind::Record);
        assert_eq!(p.text(), "\"x\":1");
    }
}
