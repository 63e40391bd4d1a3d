//! Throughput probe backed by `speedtest-cli`.

use std::process::Command;
use std::time::Duration;

use serde::Deserialize;

use super::output_with_timeout;

#[derive(Debug, Deserialize)]
struct SpeedtestReport {
    #[serde(default)]
    download: f64,
    #[serde(default)]
    upload: f64,
}

/// Download/upload throughput in Mbps via `speedtest-cli --json`. The tool
/// reports bits per second. `(0.0, 0.0)` on any failure or timeout.
pub fn run(timeout: Duration) -> (f64, f64) {
    let mut cmd = Command::new("speedtest-cli");
    cmd.arg("--json");

    let output = match output_with_timeout(cmd, timeout) {
        Ok(output) => output,
        Err(_) => return (0.0, 0.0),
    };

    parse_report(&String::from_utf8_lossy(&output.stdout))
}

fn parse_report(stdout: &str) -> (f64, f64) {
    match serde_json::from_str::<SpeedtestReport>(stdout) {
        Ok(report) => (report.download / 1e6, report.upload / 1e6),
        Err(_) => (0.0, 0.0),
    }
}
