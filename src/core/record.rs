use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// VPN presence as observed by the connectivity-interface probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VpnStatus {
    #[serde(rename = "ON")]
    On,
    #[default]
    #[serde(rename = "OFF")]
    Off,
}

impl VpnStatus {
    pub fn is_on(self) -> bool {
        self == VpnStatus::On
    }
}

/// One sampling cycle's result.
///
/// Sentinel values: `0.0` for latency/loss/throughput means "not measured",
/// `None` for the Wi-Fi signal means "not available", an empty failed-site
/// list means "all reachable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp: DateTime<Local>,
    pub vpn_status: VpnStatus,
    pub ping_ms: f64,
    pub packet_loss_pct: f64,
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub wifi_signal_dbm: Option<i32>,
    pub failed_sites: Vec<String>,
    /// Wall-clock cost of collecting this measurement
    pub duration_ms: u64,
}

/// A manual annotation entered from the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub timestamp: DateTime<Local>,
    pub note: String,
}

impl Mark {
    pub const DEFAULT_NOTE: &'static str = "manual mark";

    pub fn new(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            note: Self::DEFAULT_NOTE.to_string(),
        }
    }
}

/// A single entry in the append-only log stream.
///
/// Measurements and marks share one stream; the `kind` tag tells them apart
/// when reading the log back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogRecord {
    Measurement(Measurement),
    Mark(Mark),
}
