//! NDJSON status events.
//!
//! With `--json` the controller reports its progress as newline-delimited
//! JSON on stdout so wrapper scripts can follow a run without scraping logs.
//! Serialization goes through `serde_json_core` into a fixed buffer.

use std::io::Write;

use serde::Serialize;

use crate::mac::MacAddr;

/// Maximum size of a serialized JSON message
pub const MAX_MSG_LEN: usize = 256;

/// Status events emitted during a run
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum StatusMessage<'a> {
    /// Target AP located
    #[serde(rename = "found")]
    Found {
        bssid: MacAddr,
        ssid: &'a str,
        ch: Option<u8>,
    },
    /// Result of aligning the radio with the AP channel
    #[serde(rename = "channel")]
    Channel {
        from: Option<u8>,
        to: Option<u8>,
        ok: bool,
    },
    /// A jam round is starting
    #[serde(rename = "jam")]
    Jam { bssid: MacAddr, round: u32, ms: u64 },
    /// The run is over
    #[serde(rename = "stopped")]
    Stopped {
        /// "cancelled" or "radio_error"
        reason: &'static str,
        rounds: u32,
    },
}

/// Serialize a message to JSON followed by a newline.
/// Returns the number of bytes written, or None if it did not fit.
pub fn serialize_message(msg: &StatusMessage<'_>, buf: &mut [u8]) -> Option<usize> {
    let len = serde_json_core::to_slice(msg, buf).ok()?;
    let newline = buf.get_mut(len)?;
    *newline = b'\n';
    Some(len + 1)
}

/// Destination for status events.
pub trait StatusSink {
    fn emit(&mut self, msg: &StatusMessage<'_>);
}

/// Discards every event.
pub struct NoStatus;

impl StatusSink for NoStatus {
    fn emit(&mut self, _msg: &StatusMessage<'_>) {}
}

/// Writes each event as one NDJSON line.
pub struct NdjsonWriter<W: Write> {
    out: W,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatusSink for NdjsonWriter<W> {
    fn emit(&mut self, msg: &StatusMessage<'_>) {
        let mut buf = [0u8; MAX_MSG_LEN];
        let Some(len) = serialize_message(msg, &mut buf) else {
            log::warn!("Status message too large, dropped");
            return;
        };
        if let Err(e) = self.out.write_all(&buf[..len]).and_then(|_| self.out.flush()) {
            log::debug!("Failed to write status message: {}", e);
        }
    }
}
