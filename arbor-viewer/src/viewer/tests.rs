//! Test infrastructure for the viewer
//!
//! Provides utilities for testing the full application including:
//! - TestApp: wrapper for testing the application
//! - Keyboard helpers: easy creation of keyboard events
//! - Render helpers: getting and verifying UI output

use super::app::App;
use super::source::{self, Format};
use super::ui;
use arbor::Model;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::{Backend, TestBackend};
use ratatui::Terminal;

/// Test application wrapper with test backend
pub struct TestApp {
    app: App,
    terminal: Terminal<TestBackend>,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a new test app showing the demo tree
    pub fn new() -> Self {
        Self::with_size(source::demo_tree(), 80, 24)
    }

    /// Create a test app from a JSON document
    pub fn with_json(json: &str, width: u16, height: u16) -> Self {
        let root = source::parse_tree(json, Format::Json).expect("Failed to parse test tree");
        Self::with_size(root, width, height)
    }

    fn with_size(root: arbor::Node<String>, width: u16, height: u16) -> Self {
        let mut app = App::new(Model::new(root, 0, 0).with_scroll_off(2), "test.json");
        app.handle_resize(width, height);

        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create terminal");

        TestApp { app, terminal }
    }

    /// Send a keyboard event and return the rendered output
    pub fn send_key(&mut self, code: KeyCode) -> String {
        self.send_key_with_modifiers(code, KeyModifiers::empty())
    }

    /// Send a keyboard event with modifiers and return the rendered output
    pub fn send_key_with_modifiers(&mut self, code: KeyCode, modifiers: KeyModifiers) -> String {
        let key = KeyEvent::new(code, modifiers);
        let _ = self.app.handle_key(key);
        self.render()
    }

    /// Resize both the terminal and the app
    pub fn resize(&mut self, width: u16, height: u16) -> String {
        self.terminal.backend_mut().resize(width, height);
        self.app.handle_resize(width, height);
        self.render()
    }

    /// Render the current application state and return output
    pub fn render(&mut self) -> String {
        self.terminal
            .draw(|frame| {
                ui::render(frame, &self.app);
            })
            .expect("Failed to draw");

        self.terminal_output()
    }

    /// Get the current terminal output as a string
    fn terminal_output(&self) -> String {
        let backend = self.terminal.backend();
        let size = backend.size().expect("Failed to read size");
        let mut output = String::new();

        for y in 0..size.height {
            for x in 0..size.width {
                if let Some(cell) = backend.buffer().cell((x, y)) {
                    output.push_str(cell.symbol());
                } else {
                    output.push(' ');
                }
            }
            output.push('\n');
        }

        output
    }

    /// Get reference to the app for assertions
    pub fn app(&self) -> &App {
        &self.app
    }
}

fn numbered(n: usize) -> String {
    let items: Vec<String> = (0..n).map(|i| format!("\"item {:02}\"", i)).collect();
    format!(r#"{{"label": "list", "children": [{}]}}"#, items.join(", "))
}

#[test]
fn test_initial_render() {
    let mut test = TestApp::new();
    let output = test.render();
    assert!(output.contains("arbor:: test.json"));
    assert!(output.contains("▼ arbor"));
    assert!(output.contains("▶ arbor-config"));
    assert!(output.contains("Line: 1/"));
}

#[test]
fn test_navigation_updates_status_line() {
    let mut test = TestApp::new();
    test.send_key(KeyCode::Down);
    let output = test.send_key(KeyCode::Char('j'));
    assert!(output.contains("Node: lib.rs"));
    assert!(output.contains("Depth: 2"));
}

#[test]
fn test_toggle_collapses_subtree() {
    let mut test = TestApp::new();
    let before = test.render();
    assert!(before.contains("navigator.rs"));

    test.send_key(KeyCode::Down);
    let after = test.send_key(KeyCode::Enter);
    assert!(after.contains("▶ src"));
    assert!(!after.contains("navigator.rs"));
    assert_eq!(test.app().model.cursor(), 1);
}

#[test]
fn test_open_and_close_keys() {
    let mut test = TestApp::new();
    for _ in 0..3 {
        test.send_key(KeyCode::Char('j'));
    }
    test.send_key(KeyCode::Char('G'));
    let output = test.render();
    assert!(output.contains("Node: DESIGN.md"));

    test.send_key(KeyCode::Char('k'));
    test.send_key(KeyCode::Char('k'));
    test.send_key(KeyCode::Char('k'));
    let output = test.send_key(KeyCode::Right);
    assert!(output.contains("▼ arbor-config"));
    assert!(output.contains("▼ defaults"));
    assert!(output.contains("arbor.default.toml"));

    let output = test.send_key(KeyCode::Left);
    assert!(output.contains("▶ arbor-config"));
}

#[test]
fn test_viewport_scrolls_with_cursor() {
    // 10 lines of tree inside the borders
    let mut test = TestApp::with_json(&numbered(40), 40, 14);
    assert_eq!(test.app().model.viewport().height(), 10);

    let output = test.send_key(KeyCode::Char('G'));
    assert!(output.contains("item 39"));
    assert!(!output.contains("item 29"));
    assert!(output.contains("item 30"));

    let output = test.send_key(KeyCode::Char('g'));
    assert!(output.contains("▼ list"));
    assert!(!output.contains("item 09"));
}

#[test]
fn test_page_keys_use_tree_height() {
    let mut test = TestApp::with_json(&numbered(40), 40, 14);
    test.send_key(KeyCode::PageDown);
    assert_eq!(test.app().model.cursor(), 10);
    test.send_key_with_modifiers(KeyCode::Char('u'), KeyModifiers::CONTROL);
    assert_eq!(test.app().model.cursor(), 5);
}

#[test]
fn test_resize_keeps_cursor_visible() {
    let mut test = TestApp::with_json(&numbered(40), 40, 30);
    for _ in 0..20 {
        test.send_key(KeyCode::Down);
    }
    let output = test.resize(40, 8);
    assert_eq!(test.app().model.viewport().height(), 4);
    assert!(output.contains("item 19"));
}

#[test]
fn test_too_narrow_terminal() {
    let mut test = TestApp::with_json(&numbered(3), 15, 10);
    let output = test.render();
    assert!(output.contains("Terminal too"));
}

#[test]
fn test_quit() {
    let mut test = TestApp::new();
    test.send_key(KeyCode::Char('q'));
    assert!(test.app().should_quit);
}

#[test]
fn test_small_tree_snapshot() {
    let mut test = TestApp::with_json(
        r#"{"label": "R", "children": [{"label": "A", "children": ["A1"]}, "B"]}"#,
        24,
        8,
    );
    let output = test.send_key(KeyCode::Down);
    let trimmed: Vec<&str> = output.lines().map(str::trim_end).collect();
    insta::assert_snapshot!(trimmed.join("\n"), @r"
arbor:: test.json
┌Tree──────────────────┐
│▼ R                   │
│  ▼ A                 │
│    A1                │
│  B                   │
└──────────────────────┘
Line: 2/4 | Node: A | De
");
}
