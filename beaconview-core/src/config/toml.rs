//! TOML configuration parsing
//!
//! ```toml
//! [target]
//! address = "c1:83:1a:c4:1b:09"
//!
//! [display]
//! max_scroll_lines = 6
//! i2c_address = 0x3C
//!
//! [scan]
//! duration_s = 5
//! idle_ms = 2000
//! interval_ms = 100
//! window_ms = 99
//! active = true
//! ```
//!
//! Every key except `[target] address` is optional and falls back to the
//! defaults in [`super::types`].

use alloc::string::String;

use serde::Deserialize;

use super::types::{ConfigError, DisplayConfig, ScanConfig, TrackerConfig};
use crate::device::DeviceAddress;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    target: RawTarget,
    display: RawDisplay,
    scan: RawScan,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTarget {
    address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDisplay {
    max_scroll_lines: Option<u8>,
    i2c_address: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawScan {
    duration_s: Option<u32>,
    idle_ms: Option<u32>,
    interval_ms: Option<u16>,
    window_ms: Option<u16>,
    active: Option<bool>,
}

/// Parse and validate a TOML configuration
pub fn parse_config(input: &str) -> Result<TrackerConfig, ConfigError> {
    let raw: RawConfig = ::toml::from_str(input).map_err(|_| ConfigError::Syntax)?;

    let address = raw.target.address.ok_or(ConfigError::MissingTarget)?;
    let target = DeviceAddress::parse(&address)?;

    let display_defaults = DisplayConfig::default();
    let display = DisplayConfig {
        max_scroll_lines: raw
            .display
            .max_scroll_lines
            .unwrap_or(display_defaults.max_scroll_lines),
        i2c_address: raw.display.i2c_address.unwrap_or(display_defaults.i2c_address),
    };

    let scan_defaults = ScanConfig::default();
    let scan = ScanConfig {
        duration_s: raw.scan.duration_s.unwrap_or(scan_defaults.duration_s),
        idle_ms: raw.scan.idle_ms.unwrap_or(scan_defaults.idle_ms),
        interval_ms: raw.scan.interval_ms.unwrap_or(scan_defaults.interval_ms),
        window_ms: raw.scan.window_ms.unwrap_or(scan_defaults.window_ms),
        active: raw.scan.active.unwrap_or(scan_defaults.active),
    };

    let config = TrackerConfig {
        target,
        display,
        scan,
    };
    config.validate()?;
    Ok(config)
}
