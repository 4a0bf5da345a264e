//! Device identity and bookkeeping
//!
//! Everything the tracker knows about a device: its hardware address, the
//! label it is shown under, its signal strength, and the registry of every
//! device seen since boot.

pub mod address;
pub mod identity;
pub mod registry;

pub use address::{AddressParseError, AddressText, DeviceAddress};
pub use identity::{Identity, Rssi, MAX_IDENTITY_LEN};
pub use registry::Registry;
