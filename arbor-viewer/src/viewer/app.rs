//! Main application state and event handling
//!
//! The App struct brings together:
//! - the arbor Model (tree, cursor, viewport, key map)
//! - the styles used to draw the tree
//! - the quit flag checked by the event loop

use super::ui;
use arbor::model::Input;
use arbor::{Model, Node, Outcome, Styles};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use tracing::debug;

/// The main application
pub struct App {
    /// Tree state, driven by key events
    pub model: Model<String>,

    /// Styles for the tree lines
    pub styles: Styles<String>,

    /// Shown in the title bar
    pub title: String,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(model: Model<String>, title: impl Into<String>) -> Self {
        App {
            model,
            styles: tree_styles(),
            title: title.into(),
            should_quit: false,
        }
    }

    /// Handle a keyboard event
    ///
    /// Returns whether the state changed (needed for re-rendering)
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.model.handle_key(&key) {
            Some(Outcome::Quit) => {
                debug!("quit requested");
                self.should_quit = true;
                true
            }
            Some(Outcome::Continue) => true,
            None => false,
        }
    }

    /// Handle a terminal resize. The model only sees the area inside the
    /// tree block.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let tree = ui::tree_area(Rect::new(0, 0, width, height));
        self.model.update(Input::Resize(tree.width, tree.height));
    }
}

/// Collapsed nodes with children are muted so they stand out from leaves.
/// An open root stays bold.
fn tree_styles() -> Styles<String> {
    Styles::default().with_node_fn(|siblings: &[Node<String>], index| {
        match siblings.get(index) {
            Some(node) if node.has_children() && !node.is_open() => {
                Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
            }
            Some(node) if node.is_root() => Style::default().add_modifier(Modifier::BOLD),
            _ => Style::default(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> App {
        let root = Node::root("root".to_string())
            .subtree(Node::new("dir".to_string()).child("file".to_string()))
            .child("other".to_string());
        let mut app = App::new(Model::new(root, 0, 0), "test");
        app.handle_resize(80, 24);
        app
    }

    #[test]
    fn test_app_creation() {
        let app = app();
        assert!(!app.should_quit);
        assert_eq!(app.model.cursor(), 0);
    }

    #[test]
    fn test_resize_uses_tree_area() {
        let app = app();
        // title, status line and the block borders
        assert_eq!(app.model.viewport().height(), 20);
        assert_eq!(app.model.width(), 78);
    }

    #[test]
    fn test_unbound_key_is_no_change() {
        let mut app = app();
        assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)));
        assert_eq!(app.model.cursor(), 1);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_collapsed_style() {
        let app = app();
        let siblings = vec![
            Node::new("dir".to_string()).child("x".to_string()).close(),
            Node::new("leaf".to_string()),
        ];
        let muted = app.styles.resolve(&siblings, 0, false);
        assert_eq!(muted.fg, Some(Color::Gray));
        assert_eq!(app.styles.resolve(&siblings, 1, false), Style::default());
    }

    #[test]
    fn test_closed_root_is_muted() {
        let app = app();
        let closed = [Node::root("root".to_string()).child("x".to_string()).close()];
        assert_eq!(app.styles.resolve(&closed, 0, false).fg, Some(Color::Gray));

        let open = [Node::root("root".to_string()).child("x".to_string())];
        let style = app.styles.resolve(&open, 0, false);
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }
}
