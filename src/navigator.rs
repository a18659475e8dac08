//! Cursor navigation over the visible lines
//!
//! The [`Navigator`] owns the tree and the cursor offset. Every command is a
//! transformation of the cursor, optionally preceded by an open/close change
//! and a full layout recompute. The cursor is kept in `[0, size - 1]` at all
//! times; nothing here can fail.

use crate::flatten::{find_by_offset, find_path};
use crate::layout;
use crate::node::{Child, Node, NodePath};
use std::fmt;
use tracing::debug;

/// A discrete input command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveDown,
    MoveUp,
    PageDown,
    PageUp,
    HalfPageDown,
    HalfPageUp,
    GoToTop,
    GoToBottom,
    ToggleNode,
    OpenNode,
    CloseNode,
    Quit,
}

impl Command {
    pub const ALL: [Command; 12] = [
        Command::MoveDown,
        Command::MoveUp,
        Command::PageDown,
        Command::PageUp,
        Command::HalfPageDown,
        Command::HalfPageUp,
        Command::GoToTop,
        Command::GoToBottom,
        Command::ToggleNode,
        Command::OpenNode,
        Command::CloseNode,
        Command::Quit,
    ];

    /// Snake-case name, as used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Command::MoveDown => "move_down",
            Command::MoveUp => "move_up",
            Command::PageDown => "page_down",
            Command::PageUp => "page_up",
            Command::HalfPageDown => "half_page_down",
            Command::HalfPageUp => "half_page_up",
            Command::GoToTop => "go_to_top",
            Command::GoToBottom => "go_to_bottom",
            Command::ToggleNode => "toggle_node",
            Command::OpenNode => "open_node",
            Command::CloseNode => "close_node",
            Command::Quit => "quit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the host should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// End the session
    Quit,
}

/// How to change a node's open flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenChange {
    Toggle,
    Force(bool),
}

/// Owns the tree and the cursor
#[derive(Debug, Clone)]
pub struct Navigator<T> {
    root: Node<T>,
    cursor: usize,
}

impl<T> Navigator<T> {
    pub fn new(mut root: Node<T>) -> Self {
        layout::recompute(&mut root);
        Navigator { root, cursor: 0 }
    }

    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// Offset of the cursor node
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of visible lines
    pub fn total(&self) -> usize {
        self.root.size()
    }

    /// The visible node under the cursor
    pub fn current(&self) -> Option<&Node<T>> {
        find_by_offset(&self.root, self.cursor)
    }

    /// Move the cursor by `delta` lines, clamped to the tree.
    pub fn move_by(&mut self, delta: isize) {
        let last = self.root.size().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn page_down(&mut self, height: usize) {
        self.move_by(signed(height));
    }

    pub fn page_up(&mut self, height: usize) {
        self.move_by(-signed(height));
    }

    pub fn half_page_down(&mut self, height: usize) {
        self.move_by(signed(height / 2));
    }

    pub fn half_page_up(&mut self, height: usize) {
        self.move_by(-signed(height / 2));
    }

    pub fn goto_top(&mut self) {
        self.move_by(-signed(self.cursor));
    }

    pub fn goto_bottom(&mut self) {
        self.move_by(signed(self.root.size()));
    }

    /// Flip the open state of the node at `offset`; the cursor follows it.
    /// Returns false when no visible node sits at `offset`.
    pub fn toggle_at(&mut self, offset: usize) -> bool {
        self.change_open_at(offset, OpenChange::Toggle)
    }

    /// Open the node at `offset`; the cursor follows it.
    pub fn open_at(&mut self, offset: usize) -> bool {
        self.change_open_at(offset, OpenChange::Force(true))
    }

    /// Close the node at `offset`; the cursor follows it.
    pub fn close_at(&mut self, offset: usize) -> bool {
        self.change_open_at(offset, OpenChange::Force(false))
    }

    fn change_open_at(&mut self, offset: usize, change: OpenChange) -> bool {
        let Some(path) = find_path(&self.root, offset) else {
            debug!(offset, "no visible node at offset, ignoring");
            return false;
        };
        let Some(node) = self.root.node_at_mut(&path) else {
            return false;
        };
        let open = match change {
            OpenChange::Toggle => !node.is_open(),
            OpenChange::Force(open) => open,
        };
        node.set_open(open);
        self.follow(&path);
        debug!(%path, open, cursor = self.cursor, "open state changed");
        true
    }

    /// Attach a child below the node at `path` and recompute the layout.
    /// The cursor stays on the node it was on.
    pub fn attach(&mut self, path: &NodePath, child: Child<T>) -> bool {
        let anchor = find_path(&self.root, self.cursor);
        let Some(parent) = self.root.node_at_mut(path) else {
            return false;
        };
        parent.attach(child);
        match anchor {
            Some(anchor) => self.follow(&anchor),
            None => {
                layout::recompute(&mut self.root);
                self.move_by(0);
            }
        }
        true
    }

    /// Recompute the layout and move the cursor to the node at `path`.
    fn follow(&mut self, path: &NodePath) {
        layout::recompute(&mut self.root);
        if let Some(node) = self.root.node_at(path) {
            self.cursor = node.offset();
        }
        self.move_by(0);
    }

    /// Apply a command. `height` is the viewport height used by page moves.
    pub fn apply(&mut self, command: Command, height: usize) -> Outcome {
        match command {
            Command::MoveDown => self.move_by(1),
            Command::MoveUp => self.move_by(-1),
            Command::PageDown => self.page_down(height),
            Command::PageUp => self.page_up(height),
            Command::HalfPageDown => self.half_page_down(height),
            Command::HalfPageUp => self.half_page_up(height),
            Command::GoToTop => self.goto_top(),
            Command::GoToBottom => self.goto_bottom(),
            Command::ToggleNode => {
                self.toggle_at(self.cursor);
            }
            Command::OpenNode => {
                self.open_at(self.cursor);
            }
            Command::CloseNode => {
                self.close_at(self.cursor);
            }
            Command::Quit => return Outcome::Quit,
        }
        debug!(%command, cursor = self.cursor, "command applied");
        Outcome::Continue
    }
}

fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}
