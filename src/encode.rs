//! Encoding: building the node tree from typed values and rendering it.
//!
//! An [`Encoder`] owns one [`Arena`] for its whole life. Each call to
//! [`Encoder::encode`] appends a fresh root node, lets the value populate it
//! through the [`Codable`] protocol, and renders the tree bottom-up.
//!
//! Rendering is strictly post-order: a node is appended to the arena and
//! fully rendered before its parent assembles its own text, so a parent only
//! ever joins already-final child texts.
//!
//! ## Usage
//!
//! Most callers go through [`crate::to_string`]; the session type is useful
//! when encoding several values without paying for a new arena each time.
//!
//! ```rust
//! use codable::Encoder;
//!
//! let mut encoder = Encoder::new();
//! assert_eq!(encoder.encode(&vec![1, 2, 3]).unwrap(), "[1,2,3]");
//! assert_eq!(encoder.encode(&42i64).unwrap(), "42");
//! ```

use crate::arena::{Arena, Node, NodeId, NodeKind};
use crate::codable::Codable;
use crate::scalar::Scalar;
use crate::Result;

/// An encoding session owning one arena.
#[derive(Debug, Default)]
pub struct Encoder {
    arena: Arena,
}

impl Encoder {
    /// Creates a session with an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Encoder::default()
    }

    /// Encodes `value` as an anonymous root node and returns the rendered
    /// text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use codable::Encoder;
    ///
    /// let mut encoder = Encoder::new();
    /// assert_eq!(encoder.encode(&true).unwrap(), "true");
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the value's [`Codable::populate`].
    pub fn encode<T: Codable>(&mut self, value: &T) -> Result<String> {
        let root = self.arena.append(Node {
            kind: T::kind(),
            ..Node::default()
        });
        let mut sink = EncodeNode {
            arena: &mut self.arena,
            id: root,
        };
        value.populate(&mut sink)?;
        render(&mut self.arena, root);
        Ok(self.arena.get(root).text.clone())
    }

    /// The arena backing this session.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }
}

/// The write half of the capability protocol: one node under construction.
///
/// A value's [`Codable::populate`] receives the sink for its own node and
/// fills it in, either directly ([`EncodeNode::set_scalar`]) or by encoding
/// children ([`EncodeNode::field`], [`EncodeNode::element`]).
pub struct EncodeNode<'a> {
    arena: &'a mut Arena,
    id: NodeId,
}

impl EncodeNode<'_> {
    /// Stores a primitive literal in this node.
    ///
    /// Used by the built-in primitive impls; custom types that render as a
    /// single literal may call it too.
    pub fn set_scalar(&mut self, value: impl Into<Scalar>) {
        let node = self.arena.get_mut(self.id);
        node.kind = NodeKind::Scalar;
        node.text = value.into().render();
    }

    /// Encodes `value` as a keyed child of this node.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the value's [`Codable::populate`].
    pub fn field<T: Codable>(&mut self, key: &str, value: &T) -> Result<()> {
        self.encode_child(key, value)
    }

    /// Encodes `value` as an anonymous child of this node.
    ///
    /// Sequence elements are positional and carry no key.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the value's [`Codable::populate`].
    pub fn element<T: Codable>(&mut self, value: &T) -> Result<()> {
        self.encode_child("", value)
    }

    fn encode_child<T: Codable>(&mut self, key: &str, value: &T) -> Result<()> {
        let child = self.arena.append(Node {
            kind: T::kind(),
            key: key.to_string(),
            ..Node::default()
        });
        let mut sink = EncodeNode {
            arena: &mut *self.arena,
            id: child,
        };
        value.populate(&mut sink)?;
        render(self.arena, child);
        // Attach only after the child's text is final.
        self.arena.get_mut(self.id).children.push(child);
        Ok(())
    }
}

/// Rewrites the node's text as its rendered form: `"<key>": <body>` when the
/// key is non-empty, or the bare body otherwise.
///
/// Every child must already be rendered.
fn render(arena: &mut Arena, id: NodeId) {
    let (kind, key, children) = {
        let node = arena.get(id);
        (node.kind, node.key.clone(), node.children.clone())
    };
    let body = match kind {
        NodeKind::Scalar => arena.get(id).text.clone(),
        NodeKind::Sequence | NodeKind::Record => {
            let (open, close) = if kind == NodeKind::Sequence {
                ('[', ']')
            } else {
                ('{', '}')
            };
            let mut body = String::new();
            body.push(open);
            for (i, &child) in children.iter().enumerate() {
                if i != 0 {
                    body.push(',');
                }
                body.push_str(&arena.get(child).text);
            }
            body.push(close);
            body
        }
    };
    arena.get_mut(id).text = if key.is_empty() {
        body
    } else {
        format!("\"{}\": {}", key, body)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyed_scalar_rendering() {
        let mut encoder = Encoder::new();
        let root = encoder.arena.append(Node {
            kind: NodeKind::Record,
            ..Node::default()
        });
        let mut sink = EncodeNode {
            arena: &mut encoder.arena,
            id: root,
        };
        sink.field("x", &42i64).unwrap();
        render(&mut encoder.arena, root);

        let child = encoder.arena.get(root).children[0];
        assert_eq!(encoder.arena.get(child).text, "\"x\": 42");
        assert_eq!(encoder.arena.get(root).text, "{\"x\": 42}");
    }

    #[test]
    fn test_empty_containers() {
        let mut encoder = Encoder::new();
        assert_eq!(encoder.encode(&Vec::<i64>::new()).unwrap(), "[]");
    }

    #[test]
    fn test_sequence_rendering() {
        let mut encoder = Encoder::new();
        assert_eq!(encoder.encode(&vec![1, 2, 3]).unwrap(), "[1,2,3]");
    }

    #[test]
    fn test_text_scalar_is_quoted() {
        let mut encoder = Encoder::new();
        assert_eq!(encoder.encode(&"hi".to_string()).unwrap(), "\"hi\"");
    }

    #[test]
    fn test_session_arena_grows_per_encode() {
        let mut encoder = Encoder::new();
        encoder.encode(&1i64).unwrap();
        let after_first = encoder.arena().len();
        encoder.encode(&2i64).unwrap();
        assert!(encoder.arena().len() > after_first);
    }
}
