//! Board-agnostic core logic for the Beaconview tracker firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Device identity, addresses and the sighting registry
//! - The scan event reducer (pinned target + scrolling recent list)
//! - The display compositor
//! - Advertisement intake and the clock trait
//! - Configuration types and parsing
//! - The application entry hooks (`App::init`, `App::on_advertisement`,
//!   `App::finish_cycle`)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod app;
pub mod config;
pub mod device;
pub mod traits;
pub mod tracker;
pub mod view;

pub use app::{App, CycleReport, InitError};
pub use config::TrackerConfig;
pub use device::{DeviceAddress, Identity, Registry, Rssi};
pub use tracker::{Sighting, SightingOutcome, Tracker};
pub use view::Frame;
