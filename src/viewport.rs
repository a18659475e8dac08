//! Viewport synchronizer
//!
//! Keeps a window of `height` lines over the visible listing, scrolled so the
//! cursor has at least `scroll_off` lines of context above and below it
//! whenever the content allows.
//!
//! The effective margin is capped at `(height - 1) / 2`: the two margins plus
//! the cursor line must fit in the window, otherwise short viewports would
//! chase the cursor back and forth.

use crate::flatten::Window;
use std::ops::Range;
use tracing::debug;

pub const DEFAULT_SCROLL_OFF: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    top: usize,
    height: usize,
    scroll_off: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Viewport {
            top: 0,
            height,
            scroll_off: DEFAULT_SCROLL_OFF,
        }
    }

    pub fn with_scroll_off(mut self, scroll_off: usize) -> Self {
        self.scroll_off = scroll_off;
        self
    }

    /// First visible line
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scroll_off(&self) -> usize {
        self.scroll_off
    }

    pub fn set_scroll_off(&mut self, scroll_off: usize) {
        self.scroll_off = scroll_off;
    }

    /// Margin actually kept around the cursor for the current height
    pub fn margin(&self) -> usize {
        self.scroll_off.min(self.height.saturating_sub(1) / 2)
    }

    /// Change the height. Call [`Viewport::sync`] afterwards.
    pub fn resize(&mut self, height: usize) {
        self.height = height;
    }

    /// Scroll so the cursor keeps its margin, then pin the window inside
    /// `[0, total)`.
    pub fn sync(&mut self, cursor: usize, total: usize) {
        if total == 0 || self.height == 0 {
            self.top = 0;
            return;
        }

        let m = self.margin();
        let min_top = cursor.saturating_sub(m);
        let min_bottom = (cursor + m).min(total - 1);
        let before = self.top;

        if self.top > min_top {
            self.top = min_top;
        } else if self.top + self.height < min_bottom + 1 {
            self.top = min_bottom + 1 - self.height;
        }
        self.top = self.top.min(total.saturating_sub(self.height));

        if self.top != before {
            debug!(from = before, to = self.top, cursor, "viewport scrolled");
        }
    }

    /// Half-open range of shown lines, clipped to `total`
    pub fn range(&self, total: usize) -> Range<usize> {
        self.window().range(total)
    }

    pub fn window(&self) -> Window {
        Window {
            top: self.top,
            height: self.height,
        }
    }
}
