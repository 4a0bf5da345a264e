//! Device identity and signal strength
//!
//! A device is labelled by its advertised name when it has one, otherwise by
//! its address. The same label is used as the registry key and on screen, so
//! both always agree on how a device is called.

use core::fmt;

use heapless::String;

use super::address::DeviceAddress;

/// Maximum stored label length in bytes
///
/// Legacy advertising payloads cap names at 29 bytes; anything longer is
/// clipped on a char boundary.
pub const MAX_IDENTITY_LEN: usize = 32;

/// Replacement for characters that would break a display row
const REPLACEMENT: char = '?';

/// Registry key and on-screen label for a device
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(String<MAX_IDENTITY_LEN>);

impl Identity {
    /// Resolve the label for a device
    ///
    /// The name wins when present. A missing name, or one that is empty or
    /// only whitespace, falls back to the canonical address.
    pub fn resolve(name: Option<&str>, address: &DeviceAddress) -> Self {
        match name {
            Some(name) if !name.trim().is_empty() => Self::from_name(name),
            _ => Self::from_address(address),
        }
    }

    /// Label taken from an advertised name
    ///
    /// Control characters (including line terminators) are replaced so the
    /// label always fits on one display row.
    pub fn from_name(name: &str) -> Self {
        let mut label = String::new();
        for ch in name.chars() {
            let ch = if ch.is_control() { REPLACEMENT } else { ch };
            if label.push(ch).is_err() {
                break;
            }
        }
        Self(label)
    }

    /// Label taken from the canonical address text
    pub fn from_address(address: &DeviceAddress) -> Self {
        let mut label = String::new();
        let _ = label.push_str(address.to_text().as_str());
        Self(label)
    }

    /// Label text
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Identity {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}

/// Received signal strength in dBm
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rssi(pub i16);

impl From<i8> for Rssi {
    fn from(dbm: i8) -> Self {
        Self(dbm.into())
    }
}

impl fmt::Display for Rssi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: DeviceAddress = DeviceAddress::new([0xaa, 0xbb, 0xcc, 0x00, 0x11, 0x22]);

    #[test]
    fn test_name_takes_priority() {
        let id = Identity::resolve(Some("Alice"), &ADDR);
        assert_eq!(id.as_str(), "Alice");
    }

    #[test]
    fn test_missing_name_uses_address() {
        let id = Identity::resolve(None, &ADDR);
        assert_eq!(id.as_str(), "aa:bb:cc:00:11:22");
    }

    #[test]
    fn test_empty_or_blank_name_uses_address() {
        assert_eq!(Identity::resolve(Some(""), &ADDR).as_str(), "aa:bb:cc:00:11:22");
        assert_eq!(Identity::resolve(Some("   "), &ADDR).as_str(), "aa:bb:cc:00:11:22");
    }

    #[test]
    fn test_control_characters_replaced() {
        let id = Identity::resolve(Some("two\nlines\t"), &ADDR);
        assert_eq!(id.as_str(), "two?lines?");
    }

    #[test]
    fn test_long_name_clipped() {
        let long = "x".repeat(MAX_IDENTITY_LEN + 10);
        let id = Identity::from_name(&long);
        assert_eq!(id.as_str().len(), MAX_IDENTITY_LEN);
    }

    #[test]
    fn test_rssi_display() {
        assert_eq!(Rssi(-40).to_string(), "-40");
        assert_eq!(Rssi::from(-128i8), Rssi(-128));
        assert_eq!(Rssi(0).to_string(), "0");
    }
}
