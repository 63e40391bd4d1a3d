//! Latency and packet-loss probe.

use std::process::Command;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use super::output_with_timeout;

static LOSS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\d.]+)% packet loss").expect("loss regex"));

// The rtt summary line reads `min/avg/max/... = 9.1/12.3/15.0/... ms`;
// the second slash-separated field is the average.
static AVG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" = [\d.]+/([\d.]+)/").expect("avg regex"));

/// Average round-trip latency and packet loss from `ping -c <count> <target>`.
/// Returns `(0.0, 0.0)` when the command fails or the summary cannot be
/// parsed.
pub fn run(target: &str, count: u32, timeout: Duration) -> (f64, f64) {
    let mut cmd = Command::new("ping");
    cmd.arg("-c").arg(count.to_string()).arg(target);

    let output = match output_with_timeout(cmd, timeout) {
        Ok(output) => output,
        Err(_) => return (0.0, 0.0),
    };

    parse_summary(&String::from_utf8_lossy(&output.stdout))
}

fn parse_summary(stdout: &str) -> (f64, f64) {
    let loss = LOSS_RE
        .captures(stdout)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0.0);
    let avg = AVG_RE
        .captures(stdout)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0.0);

    (avg, loss)
}
