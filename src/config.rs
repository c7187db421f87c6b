//! Run configuration and compile-time defaults.

use core::time::Duration;

/// Default jam duration per round, in seconds.
pub const DEFAULT_JAM_SECS: u32 = 30;

/// How long discovery waits for the target's beacon.
/// Beacons go out roughly every 100ms, so one second covers ~10 intervals.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(1);

/// Largest SSID an 802.11 SSID element can carry.
pub const MAX_SSID_LEN: usize = 32;

/// Capture buffer size for a single frame.
pub const MAX_FRAME_LEN: usize = 2048;

/// Settings for one jamming run. Built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JamConfig {
    /// Wireless interface used as the jammer
    pub interface: String,
    /// Length of each jam round, in seconds. Zero is allowed.
    pub jam_secs: u32,
    /// Bound on the beacon capture during discovery
    pub discovery_timeout: Duration,
    /// Requested transmission rate ID. Accepted but not applied.
    pub rate: Option<u8>,
}

impl JamConfig {
    pub const fn new() -> Self {
        Self {
            interface: String::new(),
            jam_secs: DEFAULT_JAM_SECS,
            discovery_timeout: DEFAULT_DISCOVERY_TIMEOUT,
            rate: None,
        }
    }

    pub fn jam_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.jam_secs))
    }
}

impl Default for JamConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = JamConfig::default();
        assert!(config.interface.is_empty());
        assert_eq!(config.jam_secs, 30);
        assert_eq!(config.jam_duration(), Duration::from_secs(30));
        assert_eq!(config.discovery_timeout, Duration::from_secs(1));
        assert_eq!(config.rate, None);
    }
}
