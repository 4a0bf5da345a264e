//! Bluetooth device addresses
//!
//! Addresses are stored most-significant byte first and always printed in
//! the canonical lowercase colon-hex form, e.g. `c1:83:1a:c4:1b:09`.

use core::fmt::{self, Write};

use heapless::String;

/// Length of the canonical text form (`xx:xx:xx:xx:xx:xx`)
pub const ADDRESS_TEXT_LEN: usize = 17;

/// Canonical text form of an address
pub type AddressText = String<ADDRESS_TEXT_LEN>;

/// Error parsing an address from text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressParseError {
    /// Not six colon-separated octets
    InvalidLength,
    /// An octet is not two hex digits
    InvalidOctet,
}

/// 48-bit Bluetooth device address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceAddress([u8; 6]);

impl DeviceAddress {
    /// Create from bytes in display order (most significant first)
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Create from bytes in HCI wire order (least significant first)
    pub fn from_le_bytes(raw: [u8; 6]) -> Self {
        let mut bytes = raw;
        bytes.reverse();
        Self(bytes)
    }

    /// Bytes in display order
    pub const fn bytes(&self) -> [u8; 6] {
        self.0
    }

    /// Parse `xx:xx:xx:xx:xx:xx` (hex digits in either case)
    pub fn parse(text: &str) -> Result<Self, AddressParseError> {
        let text = text.trim();
        if text.len() != ADDRESS_TEXT_LEN {
            return Err(AddressParseError::InvalidLength);
        }

        let mut bytes = [0u8; 6];
        let mut count = 0;
        for (i, octet) in text.split(':').enumerate() {
            if i >= bytes.len() {
                return Err(AddressParseError::InvalidLength);
            }
            if octet.len() != 2 || !octet.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(AddressParseError::InvalidOctet);
            }
            bytes[i] =
                u8::from_str_radix(octet, 16).map_err(|_| AddressParseError::InvalidOctet)?;
            count += 1;
        }

        if count != bytes.len() {
            return Err(AddressParseError::InvalidLength);
        }
        Ok(Self(bytes))
    }

    /// Canonical text form
    pub fn to_text(&self) -> AddressText {
        let mut text = AddressText::new();
        // 17 chars always fit
        let _ = write!(text, "{}", self);
        text
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d, e, g)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.to_text().as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_lowercase_msb_first() {
        let addr = DeviceAddress::new([0xC1, 0x83, 0x1A, 0xC4, 0x1B, 0x09]);
        assert_eq!(addr.to_text().as_str(), "c1:83:1a:c4:1b:09");
    }

    #[test]
    fn test_from_le_bytes_reverses() {
        let addr = DeviceAddress::from_le_bytes([0x09, 0x1B, 0xC4, 0x1A, 0x83, 0xC1]);
        assert_eq!(addr.to_text().as_str(), "c1:83:1a:c4:1b:09");
    }

    #[test]
    fn test_parse_ignores_case() {
        let lower = DeviceAddress::parse("c1:83:1a:c4:1b:09").unwrap();
        let upper = DeviceAddress::parse("C1:83:1A:C4:1B:09").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_parse_round_trips_canonical_form() {
        let addr = DeviceAddress::parse(" 00:1a:ff:10:20:7e ").unwrap();
        assert_eq!(addr.to_text().as_str(), "00:1a:ff:10:20:7e");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            DeviceAddress::parse("c1:83:1a:c4:1b"),
            Err(AddressParseError::InvalidLength)
        );
        assert_eq!(
            DeviceAddress::parse("c1-83-1a-c4-1b-09"),
            Err(AddressParseError::InvalidOctet)
        );
        assert_eq!(
            DeviceAddress::parse("c1:83:1a:c4:1b:+9"),
            Err(AddressParseError::InvalidOctet)
        );
        assert_eq!(
            DeviceAddress::parse("c1:83:1a:c4:1b:zz"),
            Err(AddressParseError::InvalidOctet)
        );
        assert_eq!(
            DeviceAddress::parse("c1:83:1a:c4:1b0:9"),
            Err(AddressParseError::InvalidOctet)
        );
    }
}
