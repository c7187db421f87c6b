//! AP discovery.
//!
//! Captures one beacon from the target, completes the [`TargetIdentity`] from
//! it, and moves the radio onto the AP's channel.

use core::time::Duration;

use crate::beacon::{decode_channel, decode_ssid, is_target_beacon, BeaconHeader};
use crate::config::MAX_FRAME_LEN;
use crate::error::{Error, Result};
use crate::mac::MacAddr;
use crate::radio::{Radio, RadioError};
use crate::target::TargetIdentity;

/// How the local radio's channel was reconciled with the AP's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelSync {
    /// Radio was already on the AP channel.
    Aligned(u8),
    Switched { from: Option<u8>, to: u8 },
    /// The switch was requested and refused. Jamming continues on whatever
    /// channel the radio is on.
    Failed {
        from: Option<u8>,
        to: u8,
        error: RadioError,
    },
    /// The beacon carried no DS Parameter Set element.
    Unknown { current: Option<u8> },
}

impl ChannelSync {
    /// Channel to record for the target.
    pub fn target_channel(&self) -> Option<u8> {
        match *self {
            ChannelSync::Aligned(ch) => Some(ch),
            ChannelSync::Switched { to, .. } | ChannelSync::Failed { to, .. } => Some(to),
            ChannelSync::Unknown { current } => current,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ChannelSync::Failed { .. } | ChannelSync::Unknown { .. })
    }
}

/// Outcome of a successful discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Transmitter address of the captured beacon
    pub bssid: MacAddr,
    pub sync: ChannelSync,
}

/// Find the target's beacon and complete `target` from it.
///
/// Blocks for at most `timeout`. On failure `target` is left untouched and no
/// retry is attempted. A failed channel switch does not fail discovery; it is
/// logged and returned as [`ChannelSync::Failed`].
pub fn resolve<R: Radio>(
    radio: &mut R,
    target: &mut TargetIdentity,
    timeout: Duration,
) -> Result<Resolution> {
    let mut buf = [0u8; MAX_FRAME_LEN];

    let captured = {
        let wanted: &TargetIdentity = target;
        radio.sniff(&mut buf, &mut |frame| is_target_beacon(frame, wanted), timeout)
    };
    let len = match captured {
        Ok(len) => len,
        Err(source) => {
            log::error!("Failed to capture beacon on {}: {}", radio.interface(), source);
            return Err(Error::ApNotFound { source });
        }
    };

    let frame = &buf[..len];
    let Some(header) = BeaconHeader::parse(frame) else {
        return Err(Error::ApNotFound {
            source: RadioError::Device("capture returned a frame that is not a beacon".into()),
        });
    };

    target.bssid = Some(header.source);
    if let Some(ssid) = decode_ssid(frame) {
        target.ssid = ssid;
    }

    let sync = sync_channel(radio, decode_channel(frame));
    target.channel = sync.target_channel();

    log::info!("Found target AP {}", target);
    Ok(Resolution {
        bssid: header.source,
        sync,
    })
}

fn sync_channel<R: Radio>(radio: &mut R, ap_channel: Option<u8>) -> ChannelSync {
    let current = match radio.channel() {
        Ok(ch) => Some(ch),
        Err(e) => {
            log::warn!("Could not read channel of {}: {}", radio.interface(), e);
            None
        }
    };

    let Some(to) = ap_channel else {
        log::warn!("Beacon has no channel element, staying on current channel");
        return ChannelSync::Unknown { current };
    };

    if current == Some(to) {
        return ChannelSync::Aligned(to);
    }

    log::info!("Changing channel of {} to {}", radio.interface(), to);
    match radio.set_channel(to) {
        Ok(()) => ChannelSync::Switched { from: current, to },
        Err(error) => {
            log::warn!(
                "Failed to change channel of {} to {}: {}",
                radio.interface(),
                to,
                error
            );
            ChannelSync::Failed {
                from: current,
                to,
                error,
            }
        }
    }
}
