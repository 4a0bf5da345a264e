//! Display backend trait
//!
//! Defines the interface the compositor draws through.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Display backend trait
///
/// A fixed-width character grid. Implementations own pixel geometry, font
/// and color; callers only address rows and columns.
pub trait DisplayBackend {
    /// Bring up the display hardware
    ///
    /// Must succeed before any other call. A failure here is not retried.
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display; anything past the last column is clipped
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// For displays with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}

impl<T: DisplayBackend + ?Sized> DisplayBackend for &mut T {
    fn init(&mut self) -> Result<(), DisplayError> {
        (**self).init()
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        (**self).draw_text(row, col, text)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }

    fn dimensions(&self) -> (u8, u8) {
        (**self).dimensions()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}
