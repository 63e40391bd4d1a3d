use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the sampling tracker
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Wait between cycles when no boost window is active
    pub normal_interval: Duration,
    /// Wait between cycles while boosted
    pub boosted_interval: Duration,
    /// Length of the boost window a manual mark opens
    pub boost_duration: Duration,
    /// How many recent marks the dashboard keeps
    pub mark_capacity: usize,
    /// Refresh rate of the in-progress indicator while probes run
    pub indicator_tick: Duration,
    pub ping_target: String,
    pub ping_count: u32,
    pub ping_timeout: Duration,
    pub vpn_timeout: Duration,
    pub speedtest_timeout: Duration,
    pub wifi_timeout: Duration,
    pub http_timeout: Duration,
    /// Sites probed every cycle
    pub base_sites: Vec<String>,
    /// Sites additionally probed when the cycle starts un-boosted
    pub extra_sites: Vec<String>,
    pub log_path: PathBuf,
    /// Echo each measurement through the log facade
    pub verbose: bool,
}

impl TrackerConfig {
    /// Interval for the upcoming countdown. Decided once when the countdown
    /// starts; boost flips during the wait do not change it.
    pub fn interval_for(&self, boosted: bool) -> Duration {
        if boosted {
            self.boosted_interval
        } else {
            self.normal_interval
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            normal_interval: Duration::from_secs(60),
            boosted_interval: Duration::from_secs(15),
            boost_duration: Duration::from_secs(300),
            mark_capacity: 5,
            indicator_tick: Duration::from_millis(100),
            ping_target: "8.8.8.8".to_string(),
            ping_count: 4,
            ping_timeout: Duration::from_secs(20),
            vpn_timeout: Duration::from_secs(5),
            speedtest_timeout: Duration::from_secs(120),
            wifi_timeout: Duration::from_secs(5),
            http_timeout: Duration::from_secs(5),
            base_sites: vec![
                "https://www.google.com".to_string(),
                "https://chat.openai.com".to_string(),
                "https://www.youtube.com".to_string(),
            ],
            extra_sites: vec![
                "https://www.twitter.com".to_string(),
                "https://www.reddit.com".to_string(),
            ],
            log_path: PathBuf::from("netlog.jsonl"),
            verbose: false,
        }
    }
}
