//! Scrolling "recent devices" buffer
//!
//! A bounded FIFO of display lines. The line count is checked before the new
//! line goes in: when the buffer already holds `max_lines` lines the oldest
//! is evicted, then the new one is appended. The length therefore never
//! exceeds `max_lines` once `push` returns.

use core::fmt::Write;

use heapless::{Deque, String};

use crate::device::{Identity, Rssi, MAX_IDENTITY_LEN};

/// Hard upper bound on scroll lines
///
/// An 8-row display minus the pinned and elapsed rows.
pub const MAX_SCROLL_LINES: usize = 6;

/// Room for "<identity> <rssi>" with a 6-char signed rssi
pub const SCROLL_LINE_LEN: usize = MAX_IDENTITY_LEN + 8;

/// One line of the scroll region: `"<identity> <rssi>"`
pub type ScrollLine = String<SCROLL_LINE_LEN>;

/// Bounded FIFO of recent-device lines
#[derive(Debug, Clone)]
pub struct ScrollBuffer {
    lines: Deque<ScrollLine, MAX_SCROLL_LINES>,
    max_lines: usize,
}

impl Default for ScrollBuffer {
    fn default() -> Self {
        Self::new(MAX_SCROLL_LINES)
    }
}

impl ScrollBuffer {
    /// Create an empty buffer showing at most `max_lines` lines
    ///
    /// `max_lines` is clamped to `1..=MAX_SCROLL_LINES`.
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: Deque::new(),
            max_lines: max_lines.clamp(1, MAX_SCROLL_LINES),
        }
    }

    /// Format a display line for a device
    pub fn format_line(identity: &Identity, rssi: Rssi) -> ScrollLine {
        let mut line = ScrollLine::new();
        // Identity and rssi are both bounded to fit SCROLL_LINE_LEN
        let _ = write!(line, "{} {}", identity, rssi);
        line
    }

    /// Append a line, evicting the oldest if the buffer is full
    ///
    /// Returns the evicted line, if any.
    pub fn push(&mut self, line: ScrollLine) -> Option<ScrollLine> {
        let evicted = if self.lines.len() >= self.max_lines {
            self.lines.pop_front()
        } else {
            None
        };
        // Cannot fail: max_lines <= capacity and we just made room
        let _ = self.lines.push_back(line);
        evicted
    }

    /// Lines from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.as_str())
    }

    /// Number of lines currently held
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no lines are held
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Configured line limit
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }
}
