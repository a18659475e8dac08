//! UI rendering logic
//!
//! Handles layout and rendering of the application using Ratatui.
//! Layout structure:
//! - Title bar (1 line, fixed)
//! - Tree (bordered block, fills the remaining height)
//! - Status line (1 line, fixed)

use super::app::App;
use arbor::TreeView;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::rc::Rc;

/// Minimum terminal width required for the UI
const MIN_TERMINAL_WIDTH: u16 = 20;
/// Height of the status line
const STATUS_LINE_HEIGHT: u16 = 1;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    if size.width < MIN_TERMINAL_WIDTH {
        render_error_too_narrow(frame, size);
        return;
    }

    let chunks = split(size);
    render_title_bar(frame, chunks[0], &app.title);
    render_tree(frame, chunks[1], app);
    render_status_line(frame, chunks[2], app);
}

/// Title, tree and status line areas
fn split(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // Title bar
            Constraint::Min(1),                     // Tree
            Constraint::Length(STATUS_LINE_HEIGHT), // Status line
        ])
        .split(area)
}

fn tree_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title("Tree")
}

/// Area the tree lines are drawn in, for a terminal of size `area`
pub fn tree_area(area: Rect) -> Rect {
    tree_block().inner(split(area)[1])
}

fn render_error_too_narrow(frame: &mut Frame, area: Rect) {
    let msg = format!(
        "Terminal too narrow: {} < {} chars",
        area.width, MIN_TERMINAL_WIDTH
    );
    let paragraph =
        Paragraph::new(msg).style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    frame.render_widget(paragraph, area);
}

fn render_title_bar(frame: &mut Frame, area: Rect, title: &str) {
    let title = format!("arbor:: {}", title);
    let paragraph = Paragraph::new(title).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(paragraph, area);
}

fn render_tree(frame: &mut Frame, area: Rect, app: &App) {
    let block = tree_block();
    let inner_area = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(TreeView::new(&app.model).styles(&app.styles), inner_area);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let label_style = Style::default().fg(Color::Yellow);
    let model = &app.model;

    let mut spans = vec![
        Span::styled("Line: ", label_style),
        Span::raw(format!("{}/{}", model.cursor() + 1, model.total())),
    ];
    if let Some(node) = model.node_at_cursor() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Node: ", label_style));
        spans.push(Span::raw(node.value().clone()));
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Depth: ", label_style));
        spans.push(Span::raw(node.depth().to_string()));
    }
    spans.push(Span::raw(" | q quit"));

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(paragraph, area);
}
