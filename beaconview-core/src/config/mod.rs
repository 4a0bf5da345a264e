//! Configuration
//!
//! Board-agnostic configuration types, plus TOML parsing of the embedded
//! `beacon.toml` when the `toml` feature is enabled.

#[cfg(feature = "toml")]
pub mod toml;
pub mod types;

#[cfg(feature = "toml")]
pub use self::toml::parse_config;
pub use types::*;
