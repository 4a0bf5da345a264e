//! Display abstraction and character screen buffer for Beaconview
//!
//! This crate provides:
//! - `DisplayBackend` trait for character-grid output surfaces
//! - `Screen`, a fixed 8×21 text buffer that is rendered to a backend as a
//!   full-frame replace
//!
//! # Architecture
//!
//! The tracker core composes a `Screen` after every sighting and pushes it
//! to whatever implements `DisplayBackend`. The firmware wires in the
//! SSD1306 driver from `beaconview-drivers`; tests use in-memory mocks.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
