//! Scan event reducer
//!
//! Turns the unbounded, repeating stream of sightings into bounded display
//! state: one pinned entry for the configured target, and a FIFO scroll
//! buffer for every other device.

pub mod pinned;
pub mod reducer;
pub mod scroll;
pub mod sighting;

pub use pinned::PinnedEntry;
pub use reducer::{SightingOutcome, Tracker};
pub use scroll::{ScrollBuffer, ScrollLine, MAX_SCROLL_LINES};
pub use sighting::Sighting;
