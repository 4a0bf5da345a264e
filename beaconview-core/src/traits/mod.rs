//! Collaborator interfaces
//!
//! What the tracker logic needs from the hardware side: a monotonic
//! timebase and decoded advertisements.

pub mod clock;
pub mod scan;

pub use clock::Clock;
pub use scan::{Advertisement, CycleFilter};
