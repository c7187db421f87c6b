//! The jamming control loop.
//!
//! `Discovering → Jamming → Stopped`. Discovery runs once; jamming repeats
//! back-to-back jam commands against the resolved BSSID until the stop flag is
//! seen at the top of a round or the radio reports an error. There is no
//! backoff and no retry: a radio that fails mid-jam ends the run.

use crate::config::JamConfig;
use crate::error::{Error, Result};
use crate::mac::MacAddr;
use crate::protocol::{StatusMessage, StatusSink};
use crate::radio::Radio;
use crate::resolver::{resolve, ChannelSync};
use crate::signal::StopSignal;
use crate::target::TargetIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Discovering,
    Jamming,
    Stopped,
}

/// Summary of a run that ended because a stop was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JamReport {
    pub bssid: MacAddr,
    pub sync: ChannelSync,
    /// Jam commands that completed
    pub rounds: u32,
}

pub struct JamController<'a, R: Radio, S: StatusSink> {
    radio: &'a mut R,
    config: &'a JamConfig,
    stop: &'a StopSignal,
    status: S,
    state: State,
    rounds: u32,
}

impl<'a, R: Radio, S: StatusSink> JamController<'a, R, S> {
    pub fn new(radio: &'a mut R, config: &'a JamConfig, stop: &'a StopSignal, status: S) -> Self {
        Self {
            radio,
            config,
            stop,
            status,
            state: State::Discovering,
            rounds: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Jam commands completed so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Locate the target, then jam it until stopped.
    ///
    /// Returns normally only after a stop request. Discovery failure and jam
    /// command failure are returned as errors without any jamming or retrying.
    pub fn run(&mut self, target: &mut TargetIdentity) -> Result<JamReport> {
        self.state = State::Discovering;

        let resolution = match resolve(&mut *self.radio, target, self.config.discovery_timeout) {
            Ok(resolution) => resolution,
            Err(e) => {
                log::error!("Unable to find target AP");
                self.state = State::Stopped;
                return Err(e);
            }
        };
        self.report_discovery(target, &resolution.sync);

        let bssid = resolution.bssid;
        let duration = self.config.jam_duration();
        self.state = State::Jamming;

        while !self.stop.is_stop_requested() {
            log::info!("=========== JAMMING {} =============", bssid);
            self.status.emit(&StatusMessage::Jam {
                bssid,
                round: self.rounds,
                ms: duration.as_millis() as u64,
            });

            if let Err(source) = self.radio.jam_beacons(bssid, duration) {
                log::error!("Something went wrong when issuing the jam command: {}", source);
                self.finish("radio_error");
                return Err(Error::FatalRadio {
                    interface: self.radio.interface().into(),
                    source,
                });
            }
            self.rounds = self.rounds.saturating_add(1);
        }

        log::info!("Stopped after {} jam rounds", self.rounds);
        self.finish("cancelled");
        Ok(JamReport {
            bssid,
            sync: resolution.sync,
            rounds: self.rounds,
        })
    }

    fn report_discovery(&mut self, target: &TargetIdentity, sync: &ChannelSync) {
        if let Some(bssid) = target.bssid {
            self.status.emit(&StatusMessage::Found {
                bssid,
                ssid: target.ssid.as_str(),
                ch: target.channel,
            });
        }

        let (from, to, ok) = match *sync {
            ChannelSync::Aligned(ch) => (Some(ch), Some(ch), true),
            ChannelSync::Switched { from, to } => (from, Some(to), true),
            ChannelSync::Failed { from, to, .. } => (from, Some(to), false),
            ChannelSync::Unknown { current } => (current, None, false),
        };
        self.status.emit(&StatusMessage::Channel { from, to, ok });
    }

    fn finish(&mut self, reason: &'static str) {
        self.state = State::Stopped;
        self.status.emit(&StatusMessage::Stopped {
            reason,
            rounds: self.rounds,
        });
    }
}
