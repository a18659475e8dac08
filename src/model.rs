//! The widget model
//!
//! [`Model`] ties the pieces together for a host application:
//! - the [`Navigator`] (tree + cursor)
//! - the [`Viewport`] following the cursor
//! - the [`KeyMap`] translating key events into commands
//! - the open/closed glyphs used when rendering
//!
//! Each input is processed to completion: the command is applied, the layout
//! is already current, and the viewport is synced before `update` returns.

use crate::flatten::{self, RenderContext, Snapshot};
use crate::keymap::KeyMap;
use crate::navigator::{Command, Navigator, Outcome};
use crate::node::{Child, Node, NodePath};
use crate::viewport::Viewport;
use crossterm::event::KeyEvent;
use std::fmt;
use tracing::debug;

pub const DEFAULT_OPEN_GLYPH: &str = "▼";
pub const DEFAULT_CLOSED_GLYPH: &str = "▶";

/// Input consumed by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// New width and height of the area the tree is drawn in
    Resize(u16, u16),
}

impl From<Command> for Input {
    fn from(command: Command) -> Self {
        Input::Command(command)
    }
}

#[derive(Debug, Clone)]
pub struct Model<T> {
    navigator: Navigator<T>,
    viewport: Viewport,
    key_map: KeyMap,
    open_glyph: String,
    closed_glyph: String,
    width: u16,
}

impl<T> Model<T> {
    /// Create a model over `root` for a drawing area of `width` x `height`.
    pub fn new(root: Node<T>, width: u16, height: u16) -> Self {
        let mut model = Model {
            navigator: Navigator::new(root),
            viewport: Viewport::new(usize::from(height)),
            key_map: KeyMap::default(),
            open_glyph: DEFAULT_OPEN_GLYPH.to_string(),
            closed_glyph: DEFAULT_CLOSED_GLYPH.to_string(),
            width,
        };
        model.sync_viewport();
        model
    }

    pub fn with_scroll_off(mut self, scroll_off: usize) -> Self {
        self.viewport.set_scroll_off(scroll_off);
        self.sync_viewport();
        self
    }

    pub fn with_key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = key_map;
        self
    }

    pub fn with_glyphs(mut self, open: impl Into<String>, closed: impl Into<String>) -> Self {
        self.open_glyph = open.into();
        self.closed_glyph = closed.into();
        self
    }

    /// Process one input to completion.
    pub fn update(&mut self, input: Input) -> Outcome {
        let outcome = match input {
            Input::Command(command) => self.navigator.apply(command, self.viewport.height()),
            Input::Resize(width, height) => {
                debug!(width, height, "resize");
                self.width = width;
                self.viewport.resize(usize::from(height));
                Outcome::Continue
            }
        };
        self.sync_viewport();
        outcome
    }

    /// Translate a key event through the key map and apply it.
    /// Returns None when no command is bound to the key.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<Outcome> {
        let command = self.key_map.command_for(key)?;
        Some(self.update(Input::Command(command)))
    }

    /// Attach a child below the node at `path`. The cursor stays on its node.
    pub fn attach(&mut self, path: &NodePath, child: Child<T>) -> bool {
        let attached = self.navigator.attach(path, child);
        self.sync_viewport();
        attached
    }

    fn sync_viewport(&mut self) {
        self.viewport
            .sync(self.navigator.cursor(), self.navigator.total());
    }

    pub fn root(&self) -> &Node<T> {
        self.navigator.root()
    }

    pub fn cursor(&self) -> usize {
        self.navigator.cursor()
    }

    /// Number of visible lines
    pub fn total(&self) -> usize {
        self.navigator.total()
    }

    pub fn node_at_cursor(&self) -> Option<&Node<T>> {
        self.navigator.current()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    /// Every node in pre-order, hidden ones included
    pub fn flat_nodes(&self) -> Vec<&Node<T>> {
        flatten::flatten(self.navigator.root())
    }

    /// The per-render values shared by every node
    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            cursor: self.navigator.cursor(),
            open_glyph: &self.open_glyph,
            closed_glyph: &self.closed_glyph,
        }
    }
}

impl<T: fmt::Display> Model<T> {
    /// Everything the presentation layer needs for one frame
    pub fn snapshot(&self) -> Snapshot {
        flatten::snapshot(
            self.navigator.root(),
            &self.render_context(),
            self.viewport.window(),
        )
    }
}
