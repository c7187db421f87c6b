//! Simulated radio.
//!
//! Replays a queue of recorded frames for captures, tracks a channel, and
//! records every channel switch and jam command instead of transmitting. Used
//! by `--replay` dry runs and as the collaborator in tests.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::mac::MacAddr;
use crate::radio::{Radio, RadioError};

/// Highest 2.4 GHz channel number.
const MAX_24GHZ_CHANNEL: u8 = 14;

/// Called with the zero-based round index at the start of every jam command.
pub type JamHook = Box<dyn FnMut(usize) + Send>;

/// One recorded `jam_beacons` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JamCall {
    pub bssid: MacAddr,
    pub duration: Duration,
}

pub struct SimRadio {
    interface: String,
    frames: VecDeque<Vec<u8>>,
    channel: u8,
    realtime: bool,
    channel_read_error: Option<RadioError>,
    set_channel_error: Option<RadioError>,
    jam_error: Option<(usize, RadioError)>,
    jam_hook: Option<JamHook>,
    /// Every channel passed to `set_channel`, in order
    pub channel_switches: Vec<u8>,
    /// Every jam command, in order
    pub jam_calls: Vec<JamCall>,
}

impl SimRadio {
    pub fn new(interface: &str, channel: u8) -> Self {
        Self {
            interface: interface.into(),
            frames: VecDeque::new(),
            channel,
            realtime: false,
            channel_read_error: None,
            set_channel_error: None,
            jam_error: None,
            jam_hook: None,
            channel_switches: Vec::new(),
            jam_calls: Vec::new(),
        }
    }

    /// Queue frames to be returned by captures, in order.
    pub fn with_frames<I: IntoIterator<Item = Vec<u8>>>(mut self, frames: I) -> Self {
        self.frames.extend(frames);
        self
    }

    /// Actually wait out capture timeouts and jam durations.
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn fail_channel_read(mut self, err: RadioError) -> Self {
        self.channel_read_error = Some(err);
        self
    }

    pub fn fail_set_channel(mut self, err: RadioError) -> Self {
        self.set_channel_error = Some(err);
        self
    }

    /// Make the jam command with zero-based index `round` fail with `err`.
    pub fn fail_jam_at(mut self, round: usize, err: RadioError) -> Self {
        self.jam_error = Some((round, err));
        self
    }

    pub fn on_jam(mut self, hook: JamHook) -> Self {
        self.jam_hook = Some(hook);
        self
    }

    pub fn current_channel(&self) -> u8 {
        self.channel
    }

    /// Frames not yet consumed by a capture.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }
}

impl Radio for SimRadio {
    fn interface(&self) -> &str {
        &self.interface
    }

    fn sniff(
        &mut self,
        buf: &mut [u8],
        filter: &mut dyn FnMut(&[u8]) -> bool,
        timeout: Duration,
    ) -> Result<usize, RadioError> {
        while let Some(frame) = self.frames.pop_front() {
            if filter(&frame) {
                let len = frame.len().min(buf.len());
                buf[..len].copy_from_slice(&frame[..len]);
                return Ok(len);
            }
        }
        if self.realtime {
            thread::sleep(timeout);
        }
        Err(RadioError::Timeout)
    }

    fn channel(&mut self) -> Result<u8, RadioError> {
        match &self.channel_read_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.channel),
        }
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), RadioError> {
        self.channel_switches.push(channel);
        if let Some(err) = &self.set_channel_error {
            return Err(err.clone());
        }
        if channel == 0 || channel > MAX_24GHZ_CHANNEL {
            return Err(RadioError::UnsupportedChannel(channel));
        }
        self.channel = channel;
        Ok(())
    }

    fn jam_beacons(&mut self, bssid: MacAddr, duration: Duration) -> Result<(), RadioError> {
        let round = self.jam_calls.len();
        self.jam_calls.push(JamCall { bssid, duration });
        if let Some(hook) = self.jam_hook.as_mut() {
            hook(round);
        }
        if let Some((fail_round, err)) = &self.jam_error {
            if *fail_round == round {
                return Err(err.clone());
            }
        }
        log::debug!(
            "[sim] {}: jamming {} for {}ms",
            self.interface,
            bssid,
            duration.as_millis()
        );
        if self.realtime {
            thread::sleep(duration);
        }
        Ok(())
    }
}

// ── Replay files ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("line {line}: odd number of hex digits")]
    OddLength { line: usize },
    #[error("line {line}: invalid hex digit {found:?}")]
    InvalidDigit { line: usize, found: char },
}

/// Parse a replay file: one hex-encoded frame per line. Blank lines and lines
/// starting with `#` are skipped; whitespace and `:` inside a line are ignored.
pub fn parse_replay(text: &str) -> Result<Vec<Vec<u8>>, ReplayError> {
    let mut frames = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut digits = Vec::with_capacity(trimmed.len());
        for c in trimmed.chars().filter(|c| !c.is_whitespace() && *c != ':') {
            let d = c
                .to_digit(16)
                .ok_or(ReplayError::InvalidDigit { line, found: c })?;
            digits.push(d as u8);
        }
        if digits.len() % 2 != 0 {
            return Err(ReplayError::OddLength { line });
        }
        frames.push(digits.chunks(2).map(|p| (p[0] << 4) | p[1]).collect());
    }
    Ok(frames)
}
