use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use netpulse::core::{
    BoostController, JsonlRecorder, LogRecord, MarkHistory, Sampler, SnapshotCell, StatusSnapshot,
    TrackerConfig, VpnStatus,
};
use netpulse::probes::ProbeSet;
use tempfile::TempDir;

/// Deterministic probe set; records the `extra` flag the sampler passed to
/// the reachability probe.
struct StubProbes {
    extra_seen: Arc<AtomicBool>,
}

impl ProbeSet for StubProbes {
    fn vpn(&self) -> VpnStatus {
        VpnStatus::On
    }

    fn ping(&self) -> (f64, f64) {
        (12.3, 0.0)
    }

    fn throughput(&self) -> (f64, f64) {
        (50.0, 10.0)
    }

    fn wifi_signal(&self) -> Option<i32> {
        Some(-55)
    }

    fn reachability(&self, extra: bool) -> Vec<String> {
        self.extra_seen.store(extra, Ordering::Relaxed);
        Vec::new()
    }
}

struct Harness {
    sampler: Sampler,
    snapshots: SnapshotCell,
    boost: Arc<BoostController>,
    extra_seen: Arc<AtomicBool>,
    log_path: std::path::PathBuf,
    _dir: TempDir,
}

fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("netlog.jsonl");

    let config = TrackerConfig {
        log_path: log_path.clone(),
        ..Default::default()
    };

    let boost = Arc::new(BoostController::new(config.boost_duration));
    let marks = Arc::new(MarkHistory::new(config.mark_capacity));
    let recorder = Arc::new(JsonlRecorder::open(&log_path).unwrap());
    let snapshots = SnapshotCell::new(StatusSnapshot::initial(
        Local::now(),
        config.normal_interval,
    ));
    let extra_seen = Arc::new(AtomicBool::new(false));

    let sampler = Sampler::new(
        config,
        Box::new(StubProbes {
            extra_seen: Arc::clone(&extra_seen),
        }),
        Arc::clone(&boost),
        marks,
        recorder,
        snapshots.clone(),
    );

    Harness {
        sampler,
        snapshots,
        boost,
        extra_seen,
        log_path,
        _dir: dir,
    }
}

#[test]
fn test_startup_snapshot_has_zero_counts() {
    let h = harness();

    let snapshot = h.snapshots.latest();
    assert_eq!(snapshot.samples_taken, 0);
    assert!(!snapshot.boosted);
    assert_eq!(snapshot.until_next_secs, 60);
    assert!(snapshot.last.is_none());
}

#[test]
fn test_one_cycle_records_and_publishes() {
    let mut h = harness();
    h.sampler.run_cycle().unwrap();

    let snapshot = h.snapshots.latest();
    assert_eq!(snapshot.samples_taken, 1);

    let last = snapshot.last.expect("cycle publishes its measurement");
    assert_eq!(last.vpn_status, VpnStatus::On);
    assert_eq!(last.ping_ms, 12.3);
    assert_eq!(last.packet_loss_pct, 0.0);
    assert_eq!(last.download_mbps, 50.0);
    assert_eq!(last.upload_mbps, 10.0);
    assert_eq!(last.wifi_signal_dbm, Some(-55));
    assert!(last.failed_sites.is_empty());

    // With one sample, the running average equals that cycle's duration.
    assert_eq!(snapshot.avg_duration_ms, last.duration_ms);

    // Exactly one measurement record was appended.
    let contents = std::fs::read_to_string(&h.log_path).unwrap();
    let records: Vec<LogRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 1);
    assert!(matches!(records[0], LogRecord::Measurement(_)));
}

#[test]
fn test_no_indicator_survives_cycle_end() {
    let mut h = harness();
    h.sampler.run_cycle().unwrap();

    // The ticker is joined before the post-cycle snapshot goes out, so the
    // first thing a reader sees after the cycle has no in-progress frame.
    assert!(h.snapshots.latest().indicator.is_none());
}

#[test]
fn test_unboosted_cycle_widens_reachability() {
    let mut h = harness();
    h.sampler.run_cycle().unwrap();
    assert!(h.extra_seen.load(Ordering::Relaxed));
}

#[test]
fn test_boosted_cycle_keeps_base_sites_only() {
    let mut h = harness();
    h.boost.extend();
    h.sampler.run_cycle().unwrap();
    assert!(!h.extra_seen.load(Ordering::Relaxed));
}

#[test]
fn test_average_accumulates_across_cycles() {
    let mut h = harness();
    h.sampler.run_cycle().unwrap();
    h.sampler.run_cycle().unwrap();
    h.sampler.run_cycle().unwrap();

    let snapshot = h.snapshots.latest();
    assert_eq!(snapshot.samples_taken, 3);

    let contents = std::fs::read_to_string(&h.log_path).unwrap();
    assert_eq!(contents.lines().count(), 3);
}
