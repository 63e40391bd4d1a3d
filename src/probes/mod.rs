//! Connectivity probes.
//!
//! Each probe is independent, bounded by its own timeout, and degrades to a
//! sentinel value instead of failing the cycle. The sampler runs them
//! sequentially through the [`ProbeSet`] trait; tests substitute stubs.

pub mod ping;
pub mod reachability;
pub mod throughput;
pub mod vpn;
pub mod wifi;

use std::io;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::core::config::TrackerConfig;
use crate::core::record::VpnStatus;

/// The probes one sampling cycle runs, in order.
///
/// Implementations never panic and never block past their own timeout; a
/// probe that cannot measure returns its sentinel value.
pub trait ProbeSet: Send {
    fn vpn(&self) -> VpnStatus;

    /// (average latency ms, packet loss percent); `(0.0, 0.0)` on failure
    fn ping(&self) -> (f64, f64);

    /// (download Mbps, upload Mbps); `(0.0, 0.0)` on failure
    fn throughput(&self) -> (f64, f64);

    /// Radio signal strength in dBm; `None` when unavailable
    fn wifi_signal(&self) -> Option<i32>;

    /// Hosts that failed a reachability check; `extra` widens the site set
    fn reachability(&self, extra: bool) -> Vec<String>;
}

/// Probes backed by the host system (subprocesses and HTTP requests)
pub struct SystemProbes {
    config: TrackerConfig,
}

impl SystemProbes {
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }
}

impl ProbeSet for SystemProbes {
    fn vpn(&self) -> VpnStatus {
        vpn::check(self.config.vpn_timeout)
    }

    fn ping(&self) -> (f64, f64) {
        ping::run(
            &self.config.ping_target,
            self.config.ping_count,
            self.config.ping_timeout,
        )
    }

    fn throughput(&self) -> (f64, f64) {
        throughput::run(self.config.speedtest_timeout)
    }

    fn wifi_signal(&self) -> Option<i32> {
        wifi::signal_dbm(self.config.wifi_timeout)
    }

    fn reachability(&self, extra: bool) -> Vec<String> {
        let mut sites = self.config.base_sites.clone();
        if extra {
            sites.extend(self.config.extra_sites.iter().cloned());
        }
        reachability::check(&sites, self.config.http_timeout)
    }
}

/// Run a subprocess with a hard deadline, killing it on overrun.
pub(crate) fn output_with_timeout(mut cmd: Command, timeout: Duration) -> io::Result<Output> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn()?;
    let deadline = Instant::now() + timeout;

    loop {
        if child.try_wait()?.is_some() {
            return child.wait_with_output();
        }

        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "probe subprocess timed out",
            ));
        }

        thread::sleep(Duration::from_millis(50));
    }
}
