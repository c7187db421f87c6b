//! Beacon recognition and field extraction.
//!
//! The fixed management header is decoded by hand with explicit length checks
//! so the cheap rejections (short frame, wrong type, unicast destination) never
//! touch the body. Information elements are parsed with the ieee80211 crate.
//!
//! Safe to call from a capture callback: no allocation, no blocking.

use ieee80211::elements::DSSSParameterSetElement;
use ieee80211::match_frames;
use ieee80211::mgmt_frame::BeaconFrame;

use crate::mac::MacAddr;
use crate::target::{SsidString, TargetIdentity};

/// Minimum 802.11 management header: frame control (2) + duration (2) +
/// three addresses (18) + sequence control (2).
pub const MGMT_HEADER_LEN: usize = 24;

/// Frame control type for management frames.
const TYPE_MGMT: u8 = 0;
/// Management subtype for beacons.
const SUBTYPE_BEACON: u8 = 8;

/// Address fields of a beacon's management header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeaconHeader {
    /// Address 1
    pub destination: MacAddr,
    /// Address 2, the transmitting AP
    pub source: MacAddr,
    /// Address 3
    pub bssid: MacAddr,
}

impl BeaconHeader {
    /// Decode the header if `frame` is long enough and is a beacon.
    pub fn parse(frame: &[u8]) -> Option<Self> {
        if frame.len() < MGMT_HEADER_LEN {
            return None;
        }

        let fc = frame[0];
        let frame_type = (fc >> 2) & 0x3;
        let subtype = (fc >> 4) & 0xF;
        if frame_type != TYPE_MGMT || subtype != SUBTYPE_BEACON {
            return None;
        }

        Some(Self {
            destination: MacAddr::from_slice(&frame[4..10])?,
            source: MacAddr::from_slice(&frame[10..16])?,
            bssid: MacAddr::from_slice(&frame[16..22])?,
        })
    }
}

/// Decide whether `frame` is a beacon from the AP described by `target`.
///
/// A configured BSSID matching the transmitter address wins regardless of the
/// SSID. Otherwise the advertised SSID must equal the target SSID exactly.
pub fn is_target_beacon(frame: &[u8], target: &TargetIdentity) -> bool {
    let Some(header) = BeaconHeader::parse(frame) else {
        return false;
    };

    // Beacons are always broadcast
    if !header.destination.is_broadcast() {
        return false;
    }

    if target.bssid == Some(header.source) {
        return true;
    }

    if !target.has_ssid() {
        return false;
    }
    with_beacon(frame, |beacon| beacon.body.ssid() == Some(target.ssid.as_str())).unwrap_or(false)
}

/// Transmitter address of a beacon.
pub fn source_address(frame: &[u8]) -> Option<MacAddr> {
    BeaconHeader::parse(frame).map(|h| h.source)
}

/// SSID advertised by a beacon. `None` if the frame is not a beacon, the
/// element is missing, or it does not fit an SSID.
pub fn decode_ssid(frame: &[u8]) -> Option<SsidString> {
    with_beacon(frame, |beacon| {
        beacon.body.ssid().and_then(|ssid| SsidString::try_from(ssid).ok())
    })
    .flatten()
}

/// Operating channel from the DS Parameter Set element.
pub fn decode_channel(frame: &[u8]) -> Option<u8> {
    with_beacon(frame, |beacon| {
        beacon
            .body
            .elements
            .get_first_element::<DSSSParameterSetElement>()
            .map(|ds| ds.current_channel)
    })
    .flatten()
}

/// Run `f` on the parsed beacon. `None` for anything that fails the header
/// checks or that the element parser rejects.
fn with_beacon<T>(frame: &[u8], f: impl FnOnce(&BeaconFrame<'_>) -> T) -> Option<T> {
    BeaconHeader::parse(frame)?;
    match_frames! {
        frame,
        beacon = BeaconFrame<'_> => { f(&beacon) }
    }
    .ok()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const AP: MacAddr = MacAddr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    const STA: MacAddr = MacAddr([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);

    /// Assemble a beacon: header, fixed fields, SSID, rates, optional DS element.
    pub(crate) fn beacon_frame(dst: MacAddr, src: MacAddr, ssid: &str, channel: Option<u8>) -> Vec<u8> {
        let mut f = vec![0x80, 0x00, 0x00, 0x00];
        f.extend_from_slice(&dst.0);
        f.extend_from_slice(&src.0);
        f.extend_from_slice(&src.0);
        f.extend_from_slice(&[0x10, 0x00]);
        // timestamp, beacon interval (100 TU), capabilities (ESS)
        f.extend_from_slice(&[0; 8]);
        f.extend_from_slice(&[0x64, 0x00, 0x01, 0x00]);
        f.push(0);
        f.push(ssid.len() as u8);
        f.extend_from_slice(ssid.as_bytes());
        f.extend_from_slice(&[1, 4, 0x82, 0x84, 0x8B, 0x96]);
        if let Some(ch) = channel {
            f.extend_from_slice(&[3, 1, ch]);
        }
        f
    }

    pub(crate) fn target(bssid: Option<MacAddr>, ssid: &str) -> TargetIdentity {
        TargetIdentity::new(bssid, SsidString::try_from(ssid).unwrap())
    }

    // ── Header checks ───────────────────────────────────────────────

    #[test]
    fn short_frames_never_match() {
        let full = beacon_frame(MacAddr::BROADCAST, AP, "TestNet", Some(6));
        let by_bssid = target(Some(AP), "TestNet");
        for len in 0..MGMT_HEADER_LEN {
            assert!(!is_target_beacon(&full[..len], &by_bssid), "len {len} matched");
            assert!(BeaconHeader::parse(&full[..len]).is_none());
        }
        // 0xFF filler would look like a broadcast beacon if read past the end
        let junk = [0xFFu8; MGMT_HEADER_LEN - 1];
        assert!(!is_target_beacon(&junk, &by_bssid));
    }

    #[test]
    fn header_only_beacon_matches_by_bssid() {
        let full = beacon_frame(MacAddr::BROADCAST, AP, "TestNet", None);
        assert!(is_target_beacon(&full[..MGMT_HEADER_LEN], &target(Some(AP), "")));
    }

    #[test]
    fn non_beacon_subtypes_never_match() {
        let by_bssid = target(Some(AP), "TestNet");
        // probe response, probe request, deauth, data, ack
        for fc in [0x50u8, 0x40, 0xC0, 0x08, 0xD4] {
            let mut frame = beacon_frame(MacAddr::BROADCAST, AP, "TestNet", Some(6));
            frame[0] = fc;
            assert!(!is_target_beacon(&frame, &by_bssid), "fc {fc:#04x} matched");
        }
    }

    #[test]
    fn unicast_destination_never_matches() {
        let frame = beacon_frame(STA, AP, "TestNet", Some(6));
        assert!(!is_target_beacon(&frame, &target(Some(AP), "TestNet")));
        assert!(!is_target_beacon(&frame, &target(None, "TestNet")));
    }

    // ── Target matching ─────────────────────────────────────────────

    #[test]
    fn bssid_match_ignores_ssid() {
        let frame = beacon_frame(MacAddr::BROADCAST, AP, "SomethingElse", Some(11));
        let by_bssid: TargetIdentity = target(Some("AA:BB:CC:DD:EE:FF".parse().unwrap()), "TestNet");
        assert!(is_target_beacon(&frame, &by_bssid));
    }

    #[test]
    fn ssid_match_is_exact_and_case_sensitive() {
        let by_ssid = target(None, "TestNet");
        let exact = beacon_frame(MacAddr::BROADCAST, AP, "TestNet", Some(6));
        let lower = beacon_frame(MacAddr::BROADCAST, AP, "testnet", Some(6));
        let prefix = beacon_frame(MacAddr::BROADCAST, AP, "TestNet-5G", Some(6));
        let shorter = beacon_frame(MacAddr::BROADCAST, AP, "Test", Some(6));
        assert!(is_target_beacon(&exact, &by_ssid));
        assert!(!is_target_beacon(&lower, &by_ssid));
        assert!(!is_target_beacon(&prefix, &by_ssid));
        assert!(!is_target_beacon(&shorter, &by_ssid));
    }

    #[test]
    fn other_bssid_falls_back_to_ssid() {
        let other = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        let frame = beacon_frame(MacAddr::BROADCAST, other, "TestNet", Some(6));
        assert!(is_target_beacon(&frame, &target(Some(AP), "TestNet")));
        assert!(!is_target_beacon(&frame, &target(Some(AP), "")));
    }

    #[test]
    fn hidden_ssid_does_not_match_empty_target() {
        let frame = beacon_frame(MacAddr::BROADCAST, AP, "", Some(6));
        let other = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        assert!(!is_target_beacon(&frame, &target(Some(other), "")));
    }

    // ── Field extraction ────────────────────────────────────────────

    #[test]
    fn decodes_ssid_channel_and_source() {
        let frame = beacon_frame(MacAddr::BROADCAST, AP, "TestNet", Some(6));
        assert_eq!(decode_ssid(&frame).as_deref(), Some("TestNet"));
        assert_eq!(decode_channel(&frame), Some(6));
        assert_eq!(source_address(&frame), Some(AP));
    }

    #[test]
    fn missing_ds_element_gives_no_channel() {
        let frame = beacon_frame(MacAddr::BROADCAST, AP, "TestNet", None);
        assert_eq!(decode_channel(&frame), None);
        assert_eq!(decode_ssid(&frame).as_deref(), Some("TestNet"));
    }

    #[test]
    fn extraction_rejects_non_beacons() {
        let mut frame = beacon_frame(MacAddr::BROADCAST, AP, "TestNet", Some(6));
        frame[0] = 0x50;
        assert_eq!(decode_ssid(&frame), None);
        assert_eq!(decode_channel(&frame), None);
        assert_eq!(source_address(&frame), None);
    }
}
