use std::sync::Arc;
use std::thread;

use chrono::Local;
use netpulse::core::{Mark, MarkHistory};

fn mark(note: &str) -> Mark {
    Mark {
        timestamp: Local::now(),
        note: note.to_string(),
    }
}

#[test]
fn test_total_counts_every_mark() {
    let history = MarkHistory::new(5);

    let mut previous_total = 0;
    for i in 1..=8u64 {
        history.record(mark(&format!("m{}", i)));
        let (recent, total) = history.snapshot();

        assert_eq!(total, i);
        assert!(total >= previous_total);
        assert_eq!(recent.len() as u64, i.min(5));
        assert!(total >= recent.len() as u64);
        previous_total = total;
    }
}

#[test]
fn test_six_marks_keep_last_five() {
    let history = MarkHistory::new(5);
    for i in 1..=6 {
        history.record(mark(&format!("m{}", i)));
    }

    let (recent, total) = history.snapshot();
    assert_eq!(total, 6);
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].note, "m2");
    assert_eq!(recent[4].note, "m6");

    // One mark overflowed out of the display buffer.
    assert_eq!(total - recent.len() as u64, 1);
}

#[test]
fn test_snapshot_is_consistent_under_concurrent_writes() {
    let history = Arc::new(MarkHistory::new(5));

    let writer = {
        let history = Arc::clone(&history);
        thread::spawn(move || {
            for i in 0..500 {
                history.record(mark(&format!("w{}", i)));
            }
        })
    };

    for _ in 0..500 {
        let (recent, total) = history.snapshot();
        // The buffer and the counter are copied under one lock, so these
        // never disagree.
        assert!(recent.len() <= 5);
        assert!(total >= recent.len() as u64);
    }

    writer.join().unwrap();
    let (recent, total) = history.snapshot();
    assert_eq!(total, 500);
    assert_eq!(recent.len(), 5);
}
