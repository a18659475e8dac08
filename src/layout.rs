//! Layout engine
//!
//! Derives the cached depth, size and offset of every node from the current
//! open flags. There is no incremental update: every mutation re-walks the
//! whole tree, which is O(n) in the total node count. Interactive trees are
//! small next to terminal I/O latency, so this is the accepted bound.
//!
//! The passes run in order:
//! 1. depth, pre-order (root = 0)
//! 2. size, post-order: 1 for a closed node, otherwise 1 plus the sizes of
//!    the children (a closed child counts as 1)
//! 3. offset, pre-order: each child sits right after its preceding siblings'
//!    lines
//!
//! Offsets are assigned to every descendant, including those hidden below a
//! closed ancestor. Hidden nodes therefore carry offsets that the size pass
//! does not reserve, and they may equal the offset of a later visible node.
//! Lookups go through [`crate::flatten::find_by_offset`], which never
//! descends into closed nodes.

use crate::node::Node;
use tracing::trace;

/// Recompute depth, size and offset for `root` and all of its descendants.
pub fn recompute<T>(root: &mut Node<T>) {
    let nodes = set_depths(root, 0);
    set_sizes(root);
    root.offset = 0;
    set_offsets(root);
    trace!(nodes, size = root.size, "layout recomputed");
}

/// Lines a child contributes to its parent
pub fn effective_size<T>(node: &Node<T>) -> usize {
    if node.open {
        node.size
    } else {
        1
    }
}

/// Returns the number of nodes visited
fn set_depths<T>(node: &mut Node<T>, depth: usize) -> usize {
    node.depth = depth;
    let mut count = 1;
    for child in &mut node.children {
        count += set_depths(child, depth + 1);
    }
    count
}

fn set_sizes<T>(node: &mut Node<T>) -> usize {
    let mut size = 1;
    for child in &mut node.children {
        set_sizes(child);
        size += effective_size(child);
    }
    node.size = if node.open { size } else { 1 };
    node.size
}

fn set_offsets<T>(node: &mut Node<T>) {
    let mut next = node.offset + 1;
    for child in &mut node.children {
        child.offset = next;
        set_offsets(child);
        next += child.size;
    }
}
