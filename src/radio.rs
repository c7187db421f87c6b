//! Radio collaborator interface.
//!
//! The jam controller only ever talks to a radio through this trait. Platform
//! backends (monitor-mode sockets, patched firmware, ...) live outside this
//! crate; [`crate::sim::SimRadio`] is the in-tree implementation used for dry
//! runs and tests.

use core::time::Duration;

use thiserror::Error;

use crate::mac::MacAddr;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RadioError {
    /// No frame passed the filter before the deadline.
    #[error("timed out waiting for a matching frame")]
    Timeout,
    #[error("channel {0} is not supported by this radio")]
    UnsupportedChannel(u8),
    #[error("device error: {0}")]
    Device(String),
}

pub trait Radio {
    /// Interface name, for log messages.
    fn interface(&self) -> &str;

    /// Capture frames until one passes `filter` or `timeout` elapses.
    ///
    /// The accepted frame is copied into `buf` and its length returned. Frames
    /// longer than `buf` are truncated. `filter` only borrows each frame for
    /// the duration of the call.
    fn sniff(
        &mut self,
        buf: &mut [u8],
        filter: &mut dyn FnMut(&[u8]) -> bool,
        timeout: Duration,
    ) -> Result<usize, RadioError>;

    /// Current operating channel.
    fn channel(&mut self) -> Result<u8, RadioError>;

    fn set_channel(&mut self, channel: u8) -> Result<(), RadioError>;

    /// Jam beacons from `bssid` for `duration`. Blocks until done.
    fn jam_beacons(&mut self, bssid: MacAddr, duration: Duration) -> Result<(), RadioError>;
}
