//! Tree nodes
//!
//! A [`Node`] owns its children exclusively and carries two kinds of state:
//! - the open/closed flag, which only ever changes through explicit calls
//! - a layout cache (depth, size, offset) that [`crate::layout::recompute`]
//!   rebuilds from scratch after every mutation
//!
//! Trees are built top-down with the builder methods:
//!
//! ```text
//! Node::root("root")
//!     .subtree(Node::new("src").child("main.rs").child("lib.rs"))
//!     .child("Cargo.toml")
//! ```

use crate::layout;
use std::fmt;

/// Something that can be attached below a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Child<T> {
    /// A raw payload, wrapped into a closed leaf
    Leaf(T),
    /// A whole subtree, adopted with its open state unchanged
    Subtree(Node<T>),
}

impl<T> From<Node<T>> for Child<T> {
    fn from(node: Node<T>) -> Self {
        Child::Subtree(node)
    }
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    value: T,
    pub(crate) children: Vec<Node<T>>,
    pub(crate) open: bool,
    is_root: bool,
    /// Set by an explicit close; keeps the node closed while children are attached
    initially_closed: bool,

    // Layout cache, owned by crate::layout
    pub(crate) depth: usize,
    pub(crate) size: usize,
    pub(crate) offset: usize,
}

impl<T> Node<T> {
    /// Create the root of a tree. Roots start open.
    pub fn root(value: T) -> Self {
        Node {
            value,
            children: Vec::new(),
            open: true,
            is_root: true,
            initially_closed: false,
            depth: 0,
            size: 1,
            offset: 0,
        }
    }

    /// Create a detached, closed node. It opens once a child is attached to it,
    /// unless it was closed explicitly with [`Node::with_open`].
    pub fn new(value: T) -> Self {
        Node {
            value,
            children: Vec::new(),
            open: false,
            is_root: false,
            initially_closed: false,
            depth: 0,
            size: 1,
            offset: 0,
        }
    }

    /// Attach a child at the end of this node's children.
    ///
    /// The cached layout of `self` is recomputed as if it were a root, so
    /// `size()` is meaningful on a tree still under construction. Owners of a
    /// larger tree recompute from their own root afterwards.
    pub fn attach(&mut self, child: Child<T>) {
        let mut node = match child {
            Child::Leaf(value) => Node::new(value),
            Child::Subtree(node) => node,
        };
        node.is_root = false;
        self.children.push(node);

        if !self.initially_closed {
            self.open = true;
        }
        layout::recompute(self);
    }

    /// Builder form of [`Node::attach`] for a raw payload.
    pub fn child(mut self, value: T) -> Self {
        self.attach(Child::Leaf(value));
        self
    }

    /// Builder form of [`Node::attach`] for a subtree.
    pub fn subtree(mut self, node: Node<T>) -> Self {
        self.attach(Child::Subtree(node));
        self
    }

    /// Set the open state at construction time.
    ///
    /// Closing here is sticky for later attachments: children added after a
    /// `with_open(false)` leave the node closed.
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self.initially_closed = !open;
        layout::recompute(&mut self);
        self
    }

    /// Builder shorthand for `with_open(true)`
    pub fn open(self) -> Self {
        self.with_open(true)
    }

    /// Builder shorthand for `with_open(false)`
    pub fn close(self) -> Self {
        self.with_open(false)
    }

    /// Set the open flag. Descendants keep their own flags.
    ///
    /// This does not touch the layout cache; callers recompute from the root.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// The payload given at construction
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Children in insertion order
    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Depth in the tree; the root is 0
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of visible lines this node occupies, itself included.
    /// A closed node always has size 1.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Line offset of this node in the visible listing
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the cursor sits on this node
    pub fn is_selected(&self, cursor: usize) -> bool {
        self.offset == cursor
    }

    /// Follow a path of child indices down from this node.
    pub fn node_at(&self, path: &NodePath) -> Option<&Node<T>> {
        let mut current = self;
        for &index in path.indices() {
            current = current.children.get(index)?;
        }
        Some(current)
    }

    pub(crate) fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut Node<T>> {
        let mut current = self;
        for &index in path.indices() {
            current = current.children.get_mut(index)?;
        }
        Some(current)
    }
}

impl<T: fmt::Display> Node<T> {
    /// Display label of the payload
    pub fn label(&self) -> String {
        self.value.to_string()
    }
}

/// Stable address of a node: the child indices leading to it from the root.
///
/// `[0, 1]` is the second child of the root's first child; the empty path is
/// the root itself. Unlike offsets, paths survive open/close changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The root's path
    pub fn root() -> Self {
        NodePath(Vec::new())
    }

    pub fn new(indices: &[usize]) -> Self {
        NodePath(indices.to_vec())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "[{}]", parts.join("→"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_starts_open() {
        let root = Node::root("root");
        assert!(root.is_open());
        assert!(root.is_root());
        assert_eq!(root.size(), 1);
    }

    #[test]
    fn test_leaf_is_closed() {
        let root = Node::root("root").child("leaf");
        let leaf = &root.children()[0];
        assert!(!leaf.is_open());
        assert!(!leaf.is_root());
        assert_eq!(leaf.size(), 1);
    }

    #[test]
    fn test_attach_opens_parent() {
        let node = Node::new("dir").child("file");
        assert!(node.is_open());
        assert_eq!(node.size(), 2);
    }

    #[test]
    fn test_explicit_close_survives_attach() {
        let node = Node::new("dir").with_open(false).child("a").child("b");
        assert!(!node.is_open());
        assert_eq!(node.size(), 1);
        assert_eq!(node.children().len(), 2);
    }

    #[test]
    fn test_close_then_open_builders() {
        let node = Node::new("dir").close().child("a");
        assert!(!node.is_open());
        let node = node.open();
        assert!(node.is_open());
        assert_eq!(node.size(), 2);
    }

    #[test]
    fn test_subtree_keeps_open_state() {
        let closed = Node::new("a").child("a1").with_open(false);
        let root = Node::root("root").subtree(closed);
        assert!(!root.children()[0].is_open());
        assert_eq!(root.size(), 2);
    }

    #[test]
    fn test_adopted_root_is_not_root() {
        let root = Node::root("outer").subtree(Node::root("inner"));
        assert!(!root.children()[0].is_root());
    }

    #[test]
    fn test_duplicates_permitted() {
        let root = Node::root("r").child("x").child("x");
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.size(), 3);
    }

    #[test]
    fn test_set_open_leaves_descendants_alone() {
        let mut root = Node::root("r").subtree(Node::new("a").child("a1"));
        root.set_open(false);
        assert!(!root.is_open());
        assert!(root.children()[0].is_open());
    }

    #[test]
    fn test_node_at_path() {
        let root = Node::root("r")
            .subtree(Node::new("a").child("a1").child("a2"))
            .child("b");
        assert_eq!(root.node_at(&NodePath::root()).map(|n| *n.value()), Some("r"));
        assert_eq!(root.node_at(&NodePath::new(&[0, 1])).map(|n| *n.value()), Some("a2"));
        assert_eq!(root.node_at(&NodePath::new(&[1])).map(|n| *n.value()), Some("b"));
        assert!(root.node_at(&NodePath::new(&[5])).is_none());
    }

    #[test]
    fn test_node_path_display() {
        let path = NodePath::new(&[0, 1, 2]);
        assert_eq!(path.indices(), &[0, 1, 2]);
        assert_eq!(path.to_string(), "[0→1→2]");
        assert_eq!(NodePath::root().to_string(), "[]");
    }
}
