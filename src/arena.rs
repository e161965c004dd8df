//! Arena-backed node storage.
//!
//! Every encode or decode session owns exactly one [`Arena`]: an append-only
//! store of [`Node`]s addressed by [`NodeId`] handles. Nodes are never
//! removed individually; the whole arena is dropped with its session.
//!
//! ## Why an arena?
//!
//! The tree grows while it is being traversed: encoding a record appends a
//! child node for every field, and the parser appends a child for every
//! segment it splits off. Holding plain references into a growing `Vec`
//! would be invalidated by reallocation, so the tree is linked by integer
//! handles instead. A handle obtained at any point stays valid and addresses
//! the same logical node for the arena's entire lifetime.
//!
//! Handles are meaningful only relative to the arena that produced them.
//! Using a handle from one session against another session's arena is a
//! logic error, as is fabricating an out-of-range handle; both panic on
//! access rather than being surfaced as a recoverable [`Error`].
//!
//! [`Error`]: crate::Error

use std::fmt;

/// A stable handle to a [`Node`] inside one [`Arena`].
///
/// Cheap to copy and compare. Valid only for the arena that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminates the three shapes a node can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// A terminal value: boolean, number, or quoted text.
    #[default]
    Scalar,
    /// An ordered list of anonymous children, rendered with `[` `]`.
    Sequence,
    /// A keyed group of children, rendered with `{` `}`.
    Record,
}

/// One element of the encode/decode tree.
///
/// - `key` is the field name; empty for the root, for sequence elements,
///   and for anonymous top-level values.
/// - `text` is the literal value for a scalar, or the fully rendered
///   (encode) / originally sliced (decode) text of the subtree otherwise.
/// - `children` holds handles in insertion order. Order is semantic for
///   sequences; for records it only matters for byte-stable round-trips.
///
/// Duplicate keys among children are not rejected; lookup returns the first
/// match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub key: String,
    pub text: String,
    pub children: Vec<NodeId>,
}

impl Node {
    /// Creates an empty scalar node with the given key.
    #[must_use]
    pub fn with_key(key: &str) -> Self {
        Node {
            key: key.to_string(),
            ..Node::default()
        }
    }
}

/// Append-only node store for one encode or decode session.
///
/// # Examples
///
/// ```rust
/// use codable::arena::{Arena, Node};
///
/// let mut arena = Arena::new();
/// let id = arena.append(Node::with_key("name"));
/// assert_eq!(arena.get(id).key, "name");
/// assert_eq!(arena.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Arena::default()
    }

    /// Appends a node and returns its handle.
    ///
    /// The handle stays valid for the arena's whole lifetime.
    pub fn append(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Returns a reference to the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this arena. That is a programming
    /// error, not a recoverable condition.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns a mutable reference to the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this arena.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of nodes appended so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node has been appended yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
