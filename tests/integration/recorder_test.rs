use std::sync::Arc;
use std::thread;

use chrono::Local;
use netpulse::core::{JsonlRecorder, LogRecord, Mark, Measurement, VpnStatus};
use tempfile::TempDir;

fn sample_measurement() -> Measurement {
    Measurement {
        timestamp: Local::now(),
        vpn_status: VpnStatus::On,
        ping_ms: 12.3,
        packet_loss_pct: 0.0,
        download_mbps: 50.0,
        upload_mbps: 10.0,
        wifi_signal_dbm: Some(-55),
        failed_sites: Vec::new(),
        duration_ms: 4200,
    }
}

#[test]
fn test_measurement_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("netlog.jsonl");
    let recorder = JsonlRecorder::open(&path).unwrap();

    let record = LogRecord::Measurement(sample_measurement());
    recorder.append(&record).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    let parsed: LogRecord = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(parsed, record);
    assert!(lines.next().is_none());
}

#[test]
fn test_marks_and_measurements_share_one_stream() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("netlog.jsonl");
    let recorder = JsonlRecorder::open(&path).unwrap();

    recorder
        .append(&LogRecord::Measurement(sample_measurement()))
        .unwrap();
    recorder
        .append(&LogRecord::Mark(Mark::new(Local::now())))
        .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<LogRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 2);
    assert!(matches!(records[0], LogRecord::Measurement(_)));
    assert!(matches!(records[1], LogRecord::Mark(_)));
}

#[test]
fn test_appends_interleave_without_corruption() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("netlog.jsonl");
    let recorder = Arc::new(JsonlRecorder::open(&path).unwrap());

    // Measurements from one thread, marks from another, as in the running
    // application.
    let measurement_writer = {
        let recorder = Arc::clone(&recorder);
        thread::spawn(move || {
            for _ in 0..50 {
                recorder
                    .append(&LogRecord::Measurement(sample_measurement()))
                    .unwrap();
            }
        })
    };
    let mark_writer = {
        let recorder = Arc::clone(&recorder);
        thread::spawn(move || {
            for _ in 0..50 {
                recorder
                    .append(&LogRecord::Mark(Mark::new(Local::now())))
                    .unwrap();
            }
        })
    };

    measurement_writer.join().unwrap();
    mark_writer.join().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 100);

    // Every line is a complete record of one of the two kinds.
    for line in lines {
        let _: LogRecord = serde_json::from_str(line).unwrap();
    }
}

#[test]
fn test_open_unwritable_path_fails() {
    let result = JsonlRecorder::open("/nonexistent-dir/netlog.jsonl");
    assert!(result.is_err());
}
