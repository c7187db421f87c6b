//! The target access point record.
//!
//! Starts out partial (user supplied SSID and/or BSSID) and is completed in
//! place by [`crate::resolver::resolve`] once the AP's beacon has been seen.

use crate::config::MAX_SSID_LEN;
use crate::mac::MacAddr;

/// Bounded SSID text (802.11 caps SSIDs at 32 bytes)
pub type SsidString = heapless::String<MAX_SSID_LEN>;

/// Identity of the AP being jammed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetIdentity {
    pub bssid: Option<MacAddr>,
    /// Empty means "no SSID given".
    pub ssid: SsidString,
    pub channel: Option<u8>,
}

impl TargetIdentity {
    pub fn new(bssid: Option<MacAddr>, ssid: SsidString) -> Self {
        Self {
            bssid,
            ssid,
            channel: None,
        }
    }

    pub fn has_ssid(&self) -> bool {
        !self.ssid.is_empty()
    }

    /// Whether there is anything to look for.
    pub fn is_searchable(&self) -> bool {
        self.bssid.is_some() || self.has_ssid()
    }

    /// Both BSSID and channel are known.
    pub fn is_resolved(&self) -> bool {
        self.bssid.is_some() && self.channel.is_some()
    }
}

impl core::fmt::Display for TargetIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.bssid {
            Some(bssid) => write!(f, "{bssid}")?,
            None => f.write_str("??:??:??:??:??:??")?,
        }
        if self.has_ssid() {
            write!(f, " \"{}\"", self.ssid)?;
        }
        if let Some(ch) = self.channel {
            write!(f, " ch {ch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_identity_is_searchable_but_unresolved() {
        let by_ssid = TargetIdentity::new(None, SsidString::try_from("TestNet").unwrap());
        assert!(by_ssid.is_searchable());
        assert!(!by_ssid.is_resolved());

        let by_bssid = TargetIdentity::new(Some(MacAddr([1, 2, 3, 4, 5, 6])), SsidString::new());
        assert!(by_bssid.is_searchable());
        assert!(!by_bssid.is_resolved());

        assert!(!TargetIdentity::default().is_searchable());
    }

    #[test]
    fn display_shows_known_fields() {
        let mut target = TargetIdentity::new(
            Some(MacAddr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF])),
            SsidString::try_from("TestNet").unwrap(),
        );
        target.channel = Some(6);
        assert_eq!(target.to_string(), "AA:BB:CC:DD:EE:FF \"TestNet\" ch 6");
        assert_eq!(
            TargetIdentity::default().to_string(),
            "??:??:??:??:??:??"
        );
    }
}
