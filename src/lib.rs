//! reactivejam library: beacon-triggered AP discovery and jam control.
//!
//! Given a target access point by SSID and/or BSSID, the controller waits for
//! one of its beacons, completes the target identity from it, moves the radio
//! to the AP's channel, and then issues back-to-back jam commands against the
//! BSSID until a stop is requested.
//!
//! All radio access goes through the [`radio::Radio`] trait. The crate ships
//! only [`sim::SimRadio`], which replays recorded frames and records jam
//! commands, so everything here is testable on any host with `cargo test`.
//!
//! Module layout, leaves first:
//! - `mac`, `target`, `config`: value types and defaults
//! - `beacon`: beacon matching and element extraction
//! - `radio`, `sim`: collaborator trait and the simulated radio
//! - `resolver`: one-shot discovery and channel alignment
//! - `jam`, `signal`: the control loop and its stop flag
//! - `protocol`, `cli`, `error`: status events, arguments, error taxonomy

pub mod beacon;
pub mod cli;
pub mod config;
pub mod error;
pub mod jam;
pub mod mac;
pub mod protocol;
pub mod radio;
pub mod resolver;
pub mod signal;
pub mod sim;
pub mod target;

pub use error::{Error, Result};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
