//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows (128×64 panel, 8 px glyph height)
pub const SCREEN_ROWS: usize = 8;

/// Number of character columns (128 px wide, 6 px glyph pitch)
pub const SCREEN_COLS: usize = 21;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Screen buffer for text-mode displays
///
/// Rows are clipped to the panel width when set, so a composed screen
/// always occupies exactly `SCREEN_ROWS` display rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    lines: [String<LINE_LEN>; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Set the content of a specific row
    ///
    /// Text longer than a row is clipped at the last whole character that fits.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            for ch in text.chars() {
                if line.push(ch).is_err() {
                    break;
                }
            }
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Number of rows holding any text
    pub fn used_rows(&self) -> usize {
        self.lines.iter().filter(|l| !l.is_empty()).count()
    }

    /// Get number of rows
    pub const fn rows(&self) -> usize {
        SCREEN_ROWS
    }

    /// Get number of columns
    pub const fn cols(&self) -> usize {
        SCREEN_COLS
    }

    /// Push the whole screen to a backend
    ///
    /// Always a full-frame replace: clear, draw every non-empty row, flush.
    pub fn present<B: DisplayBackend + ?Sized>(&self, backend: &mut B) -> Result<(), DisplayError> {
        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                backend.draw_text(row as u8, 0, line.as_str())?;
            }
        }
        backend.flush()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
