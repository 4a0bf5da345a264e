//! Configuration type definitions

use crate::device::{AddressParseError, DeviceAddress};
use crate::tracker::MAX_SCROLL_LINES;

/// Target pinned when no configuration is supplied
pub const DEFAULT_TARGET: DeviceAddress = DeviceAddress::new([0xc1, 0x83, 0x1a, 0xc4, 0x1b, 0x09]);

/// Default 7-bit I2C address of the OLED
pub const DEFAULT_DISPLAY_I2C_ADDRESS: u8 = 0x3C;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML could not be parsed, or a value had the wrong type
    Syntax,
    /// `[target] address` missing
    MissingTarget,
    /// `[target] address` is not a valid address
    InvalidAddress(AddressParseError),
    /// `[display] max_scroll_lines` outside `1..=6`
    InvalidScrollLines,
    /// `[scan] window_ms` is zero or larger than `interval_ms`
    InvalidScanWindow,
    /// `[scan] duration_s` is zero
    InvalidScanDuration,
}

impl From<AddressParseError> for ConfigError {
    fn from(e: AddressParseError) -> Self {
        ConfigError::InvalidAddress(e)
    }
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Lines in the scroll region
    pub max_scroll_lines: u8,
    /// 7-bit I2C address of the panel
    pub i2c_address: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_scroll_lines: MAX_SCROLL_LINES as u8,
            i2c_address: DEFAULT_DISPLAY_I2C_ADDRESS,
        }
    }
}

/// Scan cycle configuration
///
/// Applied by the firmware scan loop; the core only validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    /// Length of each scan in seconds
    pub duration_s: u32,
    /// Idle time between scans in milliseconds
    pub idle_ms: u32,
    /// Radio scan interval in milliseconds
    pub interval_ms: u16,
    /// Radio scan window in milliseconds (≤ interval)
    pub window_ms: u16,
    /// Active scanning (request scan responses)
    pub active: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            duration_s: 5,
            idle_ms: 2000,
            interval_ms: 100,
            window_ms: 99,
            active: true,
        }
    }
}

/// Complete tracker configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackerConfig {
    /// Device pinned at the top of the display
    pub target: DeviceAddress,
    /// Display settings
    pub display: DisplayConfig,
    /// Scan cycle settings
    pub scan: ScanConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            display: DisplayConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lines = self.display.max_scroll_lines as usize;
        if lines == 0 || lines > MAX_SCROLL_LINES {
            return Err(ConfigError::InvalidScrollLines);
        }
        if self.scan.window_ms == 0 || self.scan.window_ms > self.scan.interval_ms {
            return Err(ConfigError::InvalidScanWindow);
        }
        if self.scan.duration_s == 0 {
            return Err(ConfigError::InvalidScanDuration);
        }
        Ok(())
    }
}
