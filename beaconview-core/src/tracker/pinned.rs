//! Pinned target entry

use crate::device::{AddressText, DeviceAddress, Rssi};

/// Latest sighting of the target device
///
/// Replaced wholesale on every target sighting; only the most recent
/// reading is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinnedEntry {
    /// Always the raw address, even when the target advertises a name
    pub address: DeviceAddress,
    /// Signal strength of the latest sighting
    pub rssi: Rssi,
    /// Timestamp of the latest sighting (ms since boot)
    pub seen_at_ms: u64,
}

impl PinnedEntry {
    /// Label shown in the pinned region
    pub fn label(&self) -> AddressText {
        self.address.to_text()
    }

    /// Whole seconds since the latest sighting
    ///
    /// Saturates at zero if the clock reads earlier than the sighting.
    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.seen_at_ms) / 1000
    }
}
