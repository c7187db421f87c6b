//! reactivejam: jam the beacons of one access point
//!
//! Thin shell around the library: parse arguments, install the Ctrl-C
//! handler, open the radio, run the controller, map the outcome to an exit
//! status (0 stopped, 1 radio failure, 2 bad arguments).

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use reactivejam::cli::Cli;
use reactivejam::error::{Error, EXIT_RADIO, EXIT_USAGE};
use reactivejam::jam::JamController;
use reactivejam::protocol::{NdjsonWriter, NoStatus};
use reactivejam::signal::StopSignal;
use reactivejam::sim::{parse_replay, SimRadio};
use reactivejam::VERSION;

/// Set from the Ctrl-C handler, polled by the jam loop between rounds.
static STOP: StopSignal = StopSignal::new();

/// Channel the replay radio starts on.
const REPLAY_START_CHANNEL: u8 = 1;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let json = cli.json;
    let replay = cli.replay.clone();

    let (config, mut target) = match cli.into_config() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("\"reactivejam --help\" for help.");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if let Err(e) = ctrlc::set_handler(|| {
        STOP.request_stop();
    }) {
        log::warn!("Could not install Ctrl-C handler: {}", e);
    }

    let mut radio = match open_radio(&config.interface, replay.as_deref()) {
        Ok(radio) => radio,
        Err(e) => {
            log::error!("{:#}", e);
            return ExitCode::from(EXIT_RADIO);
        }
    };

    log::info!("reactivejam v{} on {}, target {}", VERSION, config.interface, target);

    let result = if json {
        let stdout = NdjsonWriter::new(std::io::stdout().lock());
        JamController::new(&mut radio, &config, &STOP, stdout).run(&mut target)
    } else {
        JamController::new(&mut radio, &config, &STOP, NoStatus).run(&mut target)
    };

    match result {
        Ok(report) => {
            if report.sync.is_warning() {
                log::warn!("Channel was not confirmed for {}", report.bssid);
            }
            log::info!("Done: {} jam rounds against {}", report.rounds, report.bssid);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let code = e.exit_code();
            log::error!("{:#}", anyhow::Error::from(e));
            ExitCode::from(code)
        }
    }
}

/// Open the radio for `interface`. Only replay files are supported; live
/// backends plug in through `reactivejam::radio::Radio`.
fn open_radio(interface: &str, replay: Option<&Path>) -> anyhow::Result<SimRadio> {
    let Some(path) = replay else {
        return Err(Error::RadioOpen {
            interface: interface.into(),
            reason: "no live radio backend in this build, use --replay FILE for a dry run".into(),
        }
        .into());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read replay file {}", path.display()))?;
    let frames = parse_replay(&text)
        .with_context(|| format!("failed to parse replay file {}", path.display()))?;

    log::info!(
        "Replaying {} frames from {} as {}",
        frames.len(),
        path.display(),
        interface
    );
    Ok(SimRadio::new(interface, REPLAY_START_CHANNEL)
        .with_frames(frames)
        .realtime(true))
}
