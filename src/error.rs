//! Error taxonomy for a jamming run.
//!
//! Every collaborator error is returned to the caller that triggered it.
//! The only failure that is downgraded to a warning is the post-discovery
//! channel switch, which is reported through
//! [`ChannelSync`](crate::resolver::ChannelSync) instead of this type.

use thiserror::Error;

use crate::mac::ParseMacError;
use crate::radio::RadioError;

/// Process exit status for a normal stop.
pub const EXIT_OK: u8 = 0;
/// Process exit status for any radio-level failure.
pub const EXIT_RADIO: u8 = 1;
/// Process exit status for invalid command-line arguments.
pub const EXIT_USAGE: u8 = 2;

/// Problems with the user-supplied configuration. Detected before any radio I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("you must specify an interface to use for jamming (-i)")]
    MissingInterface,
    #[error("you must specify either a target SSID (-s) or a BSSID (-b)")]
    MissingTarget,
    #[error("invalid BSSID {input:?}: {source}")]
    InvalidBssid {
        input: String,
        #[source]
        source: ParseMacError,
    },
    #[error("SSID is {0} bytes, longer than the 32 byte maximum")]
    SsidTooLong(usize),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to open {interface}: {reason}")]
    RadioOpen { interface: String, reason: String },

    #[error("unable to find target AP")]
    ApNotFound {
        #[source]
        source: RadioError,
    },

    #[error("jam command failed on {interface}")]
    FatalRadio {
        interface: String,
        #[source]
        source: RadioError,
    },
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) => EXIT_USAGE,
            Error::RadioOpen { .. } | Error::ApNotFound { .. } | Error::FatalRadio { .. } => {
                EXIT_RADIO
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
