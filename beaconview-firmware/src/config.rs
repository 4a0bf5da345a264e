//! Configuration loading
//!
//! The configuration is compiled in from beacon.toml. build.rs already
//! rejects a broken file, so a parse failure here means the runtime parser
//! and the build-time checks disagree; fall back to defaults and say so.

use defmt::*;

use beaconview_core::config::{parse_config, TrackerConfig};

/// Embedded configuration (compiled into firmware)
/// Edit beacon.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../beacon.toml");

/// Parse the embedded configuration
pub fn load() -> TrackerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            TrackerConfig::default()
        }
    }
}
