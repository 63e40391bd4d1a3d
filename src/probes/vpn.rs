//! VPN presence probe.

use std::process::Command;
use std::time::Duration;

use crate::core::record::VpnStatus;

use super::output_with_timeout;

/// A tunnel interface in `ifconfig` output marks an active VPN. Never fails:
/// any error degrades to `Off`.
pub fn check(timeout: Duration) -> VpnStatus {
    let output = match output_with_timeout(Command::new("ifconfig"), timeout) {
        Ok(output) => output,
        Err(_) => return VpnStatus::Off,
    };

    if has_tunnel_interface(&String::from_utf8_lossy(&output.stdout)) {
        VpnStatus::On
    } else {
        VpnStatus::Off
    }
}

/// `utun` on macOS, `tun`/`wg` interfaces elsewhere.
fn has_tunnel_interface(text: &str) -> bool {
    text.lines().any(|line| {
        let name = match line.split(&[':', ' '][..]).next() {
            Some(name) => name,
            None => return false,
        };
        name.starts_with("utun") || name.starts_with("tun") || name.starts_with("wg")
    })
}
