//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::config::{JamConfig, DEFAULT_JAM_SECS};
use crate::error::ConfigError;
use crate::mac::MacAddr;
use crate::target::{SsidString, TargetIdentity};

#[derive(Parser, Debug)]
#[command(name = "reactivejam", version)]
#[command(about = "Locate an access point by its beacons and jam its BSSID")]
#[command(group(ArgGroup::new("target").required(true).multiple(true).args(["ssid", "bssid"])))]
pub struct Cli {
    /// Wireless interface to use as the jammer
    #[arg(short, long, value_name = "IFACE")]
    pub interface: String,

    /// SSID of the access point to jam
    #[arg(short, long)]
    pub ssid: Option<String>,

    /// MAC address of the access point to jam
    #[arg(short, long)]
    pub bssid: Option<String>,

    /// Seconds per jam round
    #[arg(short = 't', long = "time", value_name = "SECS", default_value_t = DEFAULT_JAM_SECS)]
    pub seconds: u32,

    /// Transmission rate ID for the jamming packet (not implemented)
    #[arg(short = 'p', long = "rate", value_name = "RATEID")]
    pub rate: Option<u8>,

    /// Replay hex-encoded frames from FILE instead of using a live radio
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Print NDJSON status events on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Validate the arguments into a run configuration and a partial target.
    pub fn into_config(self) -> Result<(JamConfig, TargetIdentity), ConfigError> {
        let interface = self.interface.trim();
        if interface.is_empty() {
            return Err(ConfigError::MissingInterface);
        }

        let bssid = match self.bssid.as_deref() {
            Some(text) => Some(text.parse::<MacAddr>().map_err(|source| {
                ConfigError::InvalidBssid {
                    input: text.into(),
                    source,
                }
            })?),
            None => None,
        };

        let ssid_text = self.ssid.as_deref().unwrap_or("");
        let ssid = SsidString::try_from(ssid_text)
            .map_err(|_| ConfigError::SsidTooLong(ssid_text.len()))?;

        let target = TargetIdentity::new(bssid, ssid);
        if !target.is_searchable() {
            return Err(ConfigError::MissingTarget);
        }

        if self.rate.is_some() {
            log::warn!("Rate selection of the jamming packet is not yet implemented");
        }

        let config = JamConfig {
            interface: interface.into(),
            jam_secs: self.seconds,
            rate: self.rate,
            ..JamConfig::new()
        };
        Ok((config, target))
    }
}
