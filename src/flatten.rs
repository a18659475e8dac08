//! Flattening and per-render context
//!
//! [`flatten`] lists every node in pre-order, visible or not. It is a
//! snapshot: call it again after a mutation for a fresh listing.
//!
//! Rendering does not capture the cursor in closures. Instead the model
//! builds a [`RenderContext`] once per event and [`snapshot`] hands it to
//! every visible node, producing a [`Snapshot`] the presentation layer can
//! draw without touching the tree.

use crate::node::{Node, NodePath};
use std::fmt;
use std::ops::Range;

/// All nodes in pre-order, hidden descendants included.
pub fn flatten<T>(root: &Node<T>) -> Vec<&Node<T>> {
    let mut nodes = Vec::new();
    flatten_recursive(root, &mut nodes);
    nodes
}

fn flatten_recursive<'a, T>(node: &'a Node<T>, nodes: &mut Vec<&'a Node<T>>) {
    nodes.push(node);
    for child in &node.children {
        flatten_recursive(child, nodes);
    }
}

/// Depth-first search for the visible node whose cached offset is `offset`.
///
/// Closed nodes are not descended into: their hidden descendants may carry
/// stale offsets equal to a visible node's, and must never win the lookup.
pub fn find_by_offset<T>(root: &Node<T>, offset: usize) -> Option<&Node<T>> {
    let path = find_path(root, offset)?;
    root.node_at(&path)
}

/// Path of the visible node at `offset`, if any.
///
/// Mutations go through the path rather than a borrowed node, so the caller
/// can find the node again after the layout is recomputed.
pub fn find_path<T>(root: &Node<T>, offset: usize) -> Option<NodePath> {
    let mut path = Vec::new();
    if find_path_recursive(root, offset, &mut path) {
        Some(NodePath::new(&path))
    } else {
        None
    }
}

fn find_path_recursive<T>(node: &Node<T>, offset: usize, path: &mut Vec<usize>) -> bool {
    if node.offset == offset {
        return true;
    }
    if !node.open {
        return false;
    }
    for (index, child) in node.children.iter().enumerate() {
        path.push(index);
        if find_path_recursive(child, offset, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Values shared by every node during one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext<'a> {
    /// Offset of the cursor node
    pub cursor: usize,
    pub open_glyph: &'a str,
    pub closed_glyph: &'a str,
}

impl RenderContext<'_> {
    /// Glyph for a node, or "" for leaves below the root
    pub fn glyph_for<T>(&self, node: &Node<T>) -> &str {
        if !node.has_children() && !node.is_root() {
            ""
        } else if node.is_open() {
            self.open_glyph
        } else {
            self.closed_glyph
        }
    }
}

/// Visible window bounds over the listing of visible lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub top: usize,
    pub height: usize,
}

impl Window {
    /// Half-open range of lines shown, clipped to `total`
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self.top.min(total);
        let end = (self.top + self.height).min(total);
        start..end
    }
}

/// One visible node, as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotLine {
    pub label: String,
    pub depth: usize,
    pub offset: usize,
    pub open: bool,
    pub has_children: bool,
    /// Whether the cursor is on this node
    pub selected: bool,
    pub glyph: String,
}

impl SnapshotLine {
    /// Describe one visible node under `ctx`
    pub fn new<T: fmt::Display>(node: &Node<T>, ctx: &RenderContext<'_>) -> Self {
        SnapshotLine {
            label: node.label(),
            depth: node.depth(),
            offset: node.offset(),
            open: node.is_open(),
            has_children: node.has_children(),
            selected: node.is_selected(ctx.cursor),
            glyph: ctx.glyph_for(node).to_string(),
        }
    }

    /// Indented text of the line: depth indentation, glyph, label
    pub fn text(&self) -> String {
        let indent = "  ".repeat(self.depth);
        if self.glyph.is_empty() {
            format!("{}{}", indent, self.label)
        } else {
            format!("{}{} {}", indent, self.glyph, self.label)
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Every visible node in offset order
    pub lines: Vec<SnapshotLine>,
    pub window: Window,
}

impl Snapshot {
    /// Total number of visible lines
    pub fn total(&self) -> usize {
        self.lines.len()
    }

    /// The lines inside the window
    pub fn window_lines(&self) -> &[SnapshotLine] {
        &self.lines[self.window.range(self.lines.len())]
    }

    pub fn selected(&self) -> Option<&SnapshotLine> {
        self.lines.iter().find(|line| line.selected)
    }
}

/// Plain text frame of the windowed lines, cursor marked with `>`
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.window_lines() {
            let marker = if line.selected { ">" } else { " " };
            writeln!(f, "{} {}", marker, line.text())?;
        }
        Ok(())
    }
}

/// Build the snapshot of all visible nodes under `ctx`.
pub fn snapshot<T: fmt::Display>(
    root: &Node<T>,
    ctx: &RenderContext<'_>,
    window: Window,
) -> Snapshot {
    let mut lines = Vec::with_capacity(root.size());
    snapshot_recursive(root, ctx, &mut lines);
    Snapshot { lines, window }
}

fn snapshot_recursive<T: fmt::Display>(
    node: &Node<T>,
    ctx: &RenderContext<'_>,
    lines: &mut Vec<SnapshotLine>,
) {
    lines.push(SnapshotLine::new(node, ctx));

    if node.is_open() {
        for child in node.children() {
            snapshot_recursive(child, ctx, lines);
        }
    }
}
