//! MAC address value type.
//!
//! Parses the usual colon (or dash) separated hex notation and formats back
//! to upper-case "AA:BB:CC:DD:EE:FF".

use core::fmt;
use core::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Maximum length for MAC address strings ("AA:BB:CC:DD:EE:FF")
pub type MacString = heapless::String<17>;

/// A 48-bit IEEE 802 MAC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub const BROADCAST: MacAddr = MacAddr([0xFF; 6]);
    pub const ZERO: MacAddr = MacAddr([0; 6]);

    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Read an address from the first six bytes of `data`.
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        let octets: [u8; 6] = data.get(..6)?.try_into().ok()?;
        Some(Self(octets))
    }

    pub fn octets(&self) -> &[u8; 6] {
        &self.0
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// All-zero address, used by some drivers for "no address".
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Format into a fixed-capacity string.
    pub fn to_mac_string(&self) -> MacString {
        use core::fmt::Write;
        let mut s = MacString::new();
        let _ = write!(s, "{self}");
        s
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl Serialize for MacAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_mac_string())
    }
}

/// Failure to parse a textual MAC address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMacError {
    #[error("expected 6 octets, found {0}")]
    OctetCount(usize),
    #[error("invalid octet {0:?}")]
    InvalidOctet(heapless::String<8>),
}

impl FromStr for MacAddr {
    type Err = ParseMacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let sep = if s.contains('-') { '-' } else { ':' };

        let mut octets = [0u8; 6];
        let mut count = 0;
        for part in s.split(sep) {
            if count < 6 {
                octets[count] = parse_octet(part)?;
            }
            count += 1;
        }

        if count != 6 {
            return Err(ParseMacError::OctetCount(count));
        }
        Ok(Self(octets))
    }
}

fn parse_octet(part: &str) -> Result<u8, ParseMacError> {
    let valid = !part.is_empty() && part.len() <= 2 && part.bytes().all(|b| b.is_ascii_hexdigit());
    if !valid {
        let mut shown = heapless::String::new();
        for c in part.chars() {
            if shown.push(c).is_err() {
                break;
            }
        }
        return Err(ParseMacError::InvalidOctet(shown));
    }
    u8::from_str_radix(part, 16).map_err(|_| ParseMacError::InvalidOctet(heapless::String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_colon_notation() {
        let mac: MacAddr = "aa:bb:cc:dd:ee:ff".parse().unwrap();
        assert_eq!(mac, MacAddr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]));
    }

    #[test]
    fn parse_dash_notation_and_single_digit_octets() {
        let mac: MacAddr = "0-1b-2-c3-4-d5".parse().unwrap();
        assert_eq!(mac, MacAddr([0x00, 0x1B, 0x02, 0xC3, 0x04, 0xD5]));
    }

    #[test]
    fn parse_rejects_wrong_octet_count() {
        assert_eq!(
            "aa:bb:cc:dd:ee".parse::<MacAddr>(),
            Err(ParseMacError::OctetCount(5))
        );
        assert_eq!(
            "aa:bb:cc:dd:ee:ff:00".parse::<MacAddr>(),
            Err(ParseMacError::OctetCount(7))
        );
    }

    #[test]
    fn parse_rejects_bad_octets() {
        assert!(matches!(
            "aa:bb:cc:dd:ee:zz".parse::<MacAddr>(),
            Err(ParseMacError::InvalidOctet(_))
        ));
        assert!(matches!(
            "aa:bb:cc:dd:ee:fff".parse::<MacAddr>(),
            Err(ParseMacError::InvalidOctet(_))
        ));
        assert!(matches!(
            "aa::cc:dd:ee:ff".parse::<MacAddr>(),
            Err(ParseMacError::InvalidOctet(_))
        ));
    }

    #[test]
    fn display_is_upper_case_colon_separated() {
        let mac = MacAddr([0x00, 0x1b, 0x02, 0xc3, 0x04, 0xd5]);
        assert_eq!(mac.to_mac_string().as_str(), "00:1B:02:C3:04:D5");
    }

    #[test]
    fn from_slice_needs_six_bytes() {
        assert_eq!(MacAddr::from_slice(&[1, 2, 3, 4, 5]), None);
        assert_eq!(
            MacAddr::from_slice(&[1, 2, 3, 4, 5, 6, 7]),
            Some(MacAddr([1, 2, 3, 4, 5, 6]))
        );
    }

    #[test]
    fn broadcast_and_zero() {
        assert!(MacAddr::BROADCAST.is_broadcast());
        assert!(MacAddr::default().is_zero());
        assert!(!MacAddr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]).is_broadcast());
    }
}
