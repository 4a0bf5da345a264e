//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits used by
//! beaconview-core:
//!
//! - Display drivers (SSD1306 128×64 OLED over I2C)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
