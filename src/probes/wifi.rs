//! Wi-Fi signal-strength probe.

use std::time::Duration;

/// Current Wi-Fi RSSI in dBm, when the platform exposes it.
pub fn signal_dbm(timeout: Duration) -> Option<i32> {
    read_signal(timeout)
}

#[cfg(target_os = "macos")]
fn read_signal(timeout: Duration) -> Option<i32> {
    use std::process::Command;

    use super::output_with_timeout;

    const AIRPORT: &str = "/System/Library/PrivateFrameworks/Apple80211.framework\
/Versions/Current/Resources/airport";

    let mut cmd = Command::new(AIRPORT);
    cmd.arg("-I");

    let output = output_with_timeout(cmd, timeout).ok()?;
    parse_airport(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(target_os = "linux")]
fn read_signal(_timeout: Duration) -> Option<i32> {
    let contents = std::fs::read_to_string("/proc/net/wireless").ok()?;
    parse_proc_wireless(&contents)
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn read_signal(_timeout: Duration) -> Option<i32> {
    None
}

#[allow(dead_code)]
fn parse_airport(stdout: &str) -> Option<i32> {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static RSSI_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"agrCtlRSSI: (-?\d+)").expect("rssi regex"));

    RSSI_RE.captures(stdout).and_then(|caps| caps[1].parse().ok())
}

/// `/proc/net/wireless` carries two header lines, then one line per
/// interface; the fourth column is the signal level in dBm (with a trailing
/// dot).
#[allow(dead_code)]
fn parse_proc_wireless(contents: &str) -> Option<i32> {
    let line = contents.lines().nth(2)?;
    let level = line.split_whitespace().nth(3)?;
    level.trim_end_matches('.').parse::<f64>().ok().map(|v| v as i32)
}
