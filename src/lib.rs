//! # arbor
//!
//! A navigable tree view for terminal user interfaces.
//!
//! The crate keeps a hierarchy of expandable nodes, addresses the currently
//! visible ones by line offset, moves a cursor over them and scrolls a
//! viewport to follow it.
//!
//! Per input the flow is:
//! 1. a [`Command`] reaches the [`Navigator`], which moves the cursor or
//!    opens/closes the node under it
//! 2. the [`layout`] engine recomputes depth, size and offset of every node
//! 3. the [`Viewport`] scrolls to keep the cursor inside its margin
//! 4. the host draws a [`Snapshot`] (or the ratatui [`TreeView`])
//!
//! [`Model`] bundles these for host applications:
//!
//! ```text
//! let mut model = Model::new(root, width, height);
//! if model.handle_key(&key) == Some(Outcome::Quit) { ... }
//! frame.render_widget(TreeView::new(&model), area);
//! ```

pub mod flatten;
pub mod keymap;
pub mod layout;
pub mod model;
pub mod navigator;
pub mod node;
pub mod render;
pub mod viewport;

pub use flatten::{RenderContext, Snapshot, SnapshotLine, Window};
pub use keymap::{KeyBinding, KeyMap, KeyParseError, KeyPress};
pub use model::{Input, Model};
pub use navigator::{Command, Navigator, Outcome};
pub use node::{Child, Node, NodePath};
pub use render::{StyleFn, Styles, TreeView};
pub use viewport::Viewport;
