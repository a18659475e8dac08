//! Ratatui rendering
//!
//! [`TreeView`] draws the windowed lines of a [`Model`] into a buffer. Styling
//! is resolved per line from [`Styles`]:
//! - the cursor line gets `selected` (or `selected_fn` when set)
//! - every other line gets `node_fn` when set
//! - otherwise the root line gets `root` and the rest get `node`
//!
//! Style callbacks receive the sibling list of the node and its index in it,
//! so a callback can style e.g. the last child differently. The root is
//! passed as a one-element list.

use crate::flatten::{RenderContext, SnapshotLine};
use crate::model::Model;
use crate::node::Node;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};
use std::fmt;

/// Per-line style callback: `(siblings, index) -> Style`
pub type StyleFn<T> = Box<dyn Fn(&[Node<T>], usize) -> Style>;

pub struct Styles<T> {
    pub root: Style,
    pub node: Style,
    pub selected: Style,
    pub node_fn: Option<StyleFn<T>>,
    pub selected_fn: Option<StyleFn<T>>,
}

impl<T> Styles<T> {
    pub fn with_node_fn(mut self, f: impl Fn(&[Node<T>], usize) -> Style + 'static) -> Self {
        self.node_fn = Some(Box::new(f));
        self
    }

    pub fn with_selected_fn(mut self, f: impl Fn(&[Node<T>], usize) -> Style + 'static) -> Self {
        self.selected_fn = Some(Box::new(f));
        self
    }

    /// Style for the node at `siblings[index]`
    pub fn resolve(&self, siblings: &[Node<T>], index: usize, selected: bool) -> Style {
        if selected {
            match &self.selected_fn {
                Some(f) => f(siblings, index),
                None => self.selected,
            }
        } else if let Some(f) = &self.node_fn {
            f(siblings, index)
        } else if siblings.get(index).is_some_and(|n| n.is_root()) {
            self.root
        } else {
            self.node
        }
    }
}

impl<T> Default for Styles<T> {
    fn default() -> Self {
        Styles {
            root: Style::default().add_modifier(Modifier::BOLD),
            node: Style::default(),
            selected: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            node_fn: None,
            selected_fn: None,
        }
    }
}

impl<T> fmt::Debug for Styles<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Styles")
            .field("root", &self.root)
            .field("node", &self.node)
            .field("selected", &self.selected)
            .field("node_fn", &self.node_fn.is_some())
            .field("selected_fn", &self.selected_fn.is_some())
            .finish()
    }
}

/// Widget drawing the visible window of a model
pub struct TreeView<'a, T> {
    model: &'a Model<T>,
    styles: Option<&'a Styles<T>>,
}

impl<'a, T> TreeView<'a, T> {
    pub fn new(model: &'a Model<T>) -> Self {
        TreeView {
            model,
            styles: None,
        }
    }

    pub fn styles(mut self, styles: &'a Styles<T>) -> Self {
        self.styles = Some(styles);
        self
    }
}

impl<T: fmt::Display> TreeView<'_, T> {
    /// Styled lines for every visible node, in offset order
    fn lines(&self, styles: &Styles<T>) -> Vec<Line<'static>> {
        let ctx = self.model.render_context();
        let mut lines = Vec::with_capacity(self.model.total());
        collect_lines(
            std::slice::from_ref(self.model.root()),
            &ctx,
            styles,
            &mut lines,
        );
        lines
    }
}

fn collect_lines<T: fmt::Display>(
    siblings: &[Node<T>],
    ctx: &RenderContext<'_>,
    styles: &Styles<T>,
    lines: &mut Vec<Line<'static>>,
) {
    for (index, node) in siblings.iter().enumerate() {
        let line = SnapshotLine::new(node, ctx);
        let style = styles.resolve(siblings, index, line.selected);
        lines.push(Line::styled(line.text(), style));

        if node.is_open() {
            collect_lines(node.children(), ctx, styles, lines);
        }
    }
}

impl<T: fmt::Display> Widget for TreeView<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let default_styles;
        let styles = match self.styles {
            Some(styles) => styles,
            None => {
                default_styles = Styles::default();
                &default_styles
            }
        };

        let mut lines = self.lines(styles);
        let range = self.model.viewport().range(lines.len());
        let shown: Vec<Line> = lines.drain(range).collect();
        Paragraph::new(shown).render(area, buf);
    }
}
