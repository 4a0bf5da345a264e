//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C.
//! Text is laid out on a 21 × 8 character grid.

use beaconview_display::{DisplayBackend, DisplayError};
use embedded_hal::i2c::I2c;

use super::framebuffer::{FrameBuffer, PAGES, TEXT_COLS, TEXT_ROWS, WIDTH};

/// Default SSD1306 I2C address
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte: command stream follows
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: display RAM data follows
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Power-up sequence for a 128x64 panel on the internal charge pump
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F,
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_MEMORY_MODE,
    0x02, // page addressing
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::RESUME_RAM,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    buffer: FrameBuffer,
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a driver for a panel at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: FrameBuffer::new(),
            initialized: false,
        }
    }

    fn commands(&mut self, cmds: &[u8]) -> Result<(), DisplayError> {
        for &c in cmds {
            self.i2c
                .write(self.address, &[CONTROL_COMMAND, c])
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }
}

impl<I2C: I2c> DisplayBackend for Ssd1306<I2C> {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.commands(INIT_SEQUENCE)?;
        self.buffer.clear();
        self.initialized = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        self.buffer.clear();
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        if row as usize >= TEXT_ROWS || col as usize >= TEXT_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.buffer.draw_text(row as usize, col as usize, text);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;

        for page in 0..PAGES {
            self.commands(&[
                cmd::SET_PAGE_ADDR | page as u8,
                cmd::SET_LOW_COLUMN,
                cmd::SET_HIGH_COLUMN,
            ])?;

            if let Some(bytes) = self.buffer.page(page) {
                data[1..].copy_from_slice(bytes);
            }
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (TEXT_COLS as u8, TEXT_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}
