use anyhow::Result;
use clap::{Arg, Command};

use netpulse::core::config::TrackerConfig;
use netpulse::ui::run_tracker_app;

fn main() -> Result<()> {
    let matches = Command::new("netpulse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Unattended network-health sampler with a live terminal dashboard")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Echo each measurement through the log stream (stderr)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Append-only JSONL log file")
                .default_value("netlog.jsonl"),
        )
        .get_matches();

    netpulse::init_logging();

    let mut config = TrackerConfig::default();
    config.verbose = matches.get_flag("verbose");
    if let Some(path) = matches.get_one::<String>("log-file") {
        config.log_path = path.into();
    }

    run_tracker_app(config)
}
