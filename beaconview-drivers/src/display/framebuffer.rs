//! Monochrome page-organized frame buffer
//!
//! Matches the SSD1306/SH1106 memory layout: eight pages of 128 columns,
//! each byte a vertical strip of 8 pixels with bit 0 at the top.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

/// Panel width in pixels
pub const WIDTH: usize = 128;

/// Panel height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// Horizontal pitch of one character cell
pub const GLYPH_WIDTH: usize = 6;

/// Vertical pitch of one character cell
pub const GLYPH_HEIGHT: usize = 8;

/// Character columns that fit on the panel
pub const TEXT_COLS: usize = WIDTH / GLYPH_WIDTH;

/// Character rows that fit on the panel
pub const TEXT_ROWS: usize = HEIGHT / GLYPH_HEIGHT;

/// 5×8 glyphs on a 6 px pitch: 21 columns × 8 rows
const FONT: MonoFont<'static> = MonoFont {
    character_spacing: 1,
    ..FONT_5X8
};

/// 1 bpp frame buffer
#[derive(Clone)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a blank buffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Blank every pixel
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Raw bytes of one page
    pub fn page(&self, page: usize) -> Option<&[u8; WIDTH]> {
        self.pages.get(page)
    }

    /// Read a single pixel
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Draw text into a character cell grid position
    ///
    /// Characters past the last column are dropped.
    pub fn draw_text(&mut self, row: usize, col: usize, text: &str) {
        let room = TEXT_COLS.saturating_sub(col);
        let end = text
            .char_indices()
            .nth(room)
            .map(|(i, _)| i)
            .unwrap_or(text.len());

        let origin = Point::new((col * GLYPH_WIDTH) as i32, (row * GLYPH_HEIGHT) as i32);
        let style = MonoTextStyle::new(&FONT, BinaryColor::On);
        let _ = Text::with_baseline(&text[..end], origin, style, Baseline::Top).draw(self);
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let bit = 1u8 << (y % 8);
            let byte = &mut self.pages[y / 8][x];
            match color {
                BinaryColor::On => *byte |= bit,
                BinaryColor::Off => *byte &= !bit,
            }
        }
        Ok(())
    }
}
