//! Advertisement intake
//!
//! The radio side owns scan timing and clears its results between cycles.
//! It hands every advertisement it hears
//! to [`crate::App::on_advertisement`], one at a time, each handled to
//! completion before the next is delivered.

use heapless::FnvIndexSet;

use crate::device::{DeviceAddress, Rssi};

/// AD type: shortened local name
const AD_SHORTENED_LOCAL_NAME: u8 = 0x08;

/// AD type: complete local name
const AD_COMPLETE_LOCAL_NAME: u8 = 0x09;

/// Maximum distinct addresses remembered per scan cycle
pub const MAX_CYCLE_DEVICES: usize = 64;

/// One advertisement as reported by the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advertisement<'a> {
    /// Advertiser address
    pub address: DeviceAddress,
    /// Local name, if the payload carried a usable one
    pub name: Option<&'a str>,
    /// Signal strength
    pub rssi: Rssi,
}

impl<'a> Advertisement<'a> {
    /// Build an advertisement from a raw AD payload
    pub fn from_payload(address: DeviceAddress, rssi: Rssi, payload: &'a [u8]) -> Self {
        Self {
            address,
            name: local_name(payload),
            rssi,
        }
    }
}

/// Extract the local name from an advertising payload
///
/// Prefers the complete name over the shortened one. Names that are not
/// valid UTF-8 are ignored. Parsing stops at the first malformed structure.
pub fn local_name(payload: &[u8]) -> Option<&str> {
    let mut shortened = None;
    let mut rest = payload;

    while let Some((&len, tail)) = rest.split_first() {
        let len = len as usize;
        if len == 0 {
            // Zero-length structure marks early end of significant data
            break;
        }
        if tail.len() < len {
            break;
        }
        let (structure, next) = tail.split_at(len);
        rest = next;

        let (ad_type, data) = (structure[0], &structure[1..]);
        match ad_type {
            AD_COMPLETE_LOCAL_NAME => {
                if let Ok(name) = core::str::from_utf8(data) {
                    return Some(name);
                }
            }
            AD_SHORTENED_LOCAL_NAME => {
                if let Ok(name) = core::str::from_utf8(data) {
                    shortened = Some(name);
                }
            }
            _ => {}
        }
    }

    shortened
}

/// Per-cycle duplicate filter
///
/// Radios report the same advertiser many times per window. A driver that
/// wants one report per device per cycle asks the filter before delivering
/// and resets it when the cycle's results are cleared.
#[derive(Debug, Default)]
pub struct CycleFilter {
    seen: FnvIndexSet<DeviceAddress, MAX_CYCLE_DEVICES>,
}

impl CycleFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `address` is new in this cycle, and remember it
    ///
    /// Once the filter is full every further address is admitted, so a
    /// crowded cycle shows repeats rather than dropping devices.
    pub fn admit(&mut self, address: DeviceAddress) -> bool {
        match self.seen.insert(address) {
            Ok(newly_inserted) => newly_inserted,
            Err(_) => true,
        }
    }

    /// Distinct addresses recorded this cycle
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if nothing was recorded this cycle
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forget everything; call at the end of each cycle
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}
