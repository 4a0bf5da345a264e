//! Sighting events

use crate::device::{DeviceAddress, Identity, Rssi};
use crate::traits::Advertisement;

/// One observed advertisement, ready for the reducer
///
/// Produced per advertisement and consumed immediately; never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sighting {
    /// Display/registry label (name if present, else address)
    pub identity: Identity,
    /// Signal strength
    pub rssi: Rssi,
    /// Hardware address as reported by the radio
    pub address: DeviceAddress,
}

impl Sighting {
    /// Build a sighting, resolving the identity from name and address
    pub fn new(name: Option<&str>, address: DeviceAddress, rssi: Rssi) -> Self {
        Self {
            identity: Identity::resolve(name, &address),
            rssi,
            address,
        }
    }

    /// Build a sighting from a received advertisement
    pub fn from_advertisement(adv: &Advertisement<'_>) -> Self {
        Self::new(adv.name, adv.address, adv.rssi)
    }
}
