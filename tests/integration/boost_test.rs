use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use netpulse::core::BoostController;

const BOOST: Duration = Duration::from_secs(300);

#[test]
fn test_starts_unboosted() {
    let boost = BoostController::new(BOOST);
    assert!(!boost.is_boosted());
    assert!(boost.remaining(Instant::now()).is_none());
}

#[test]
fn test_extend_opens_one_flat_window() {
    let boost = BoostController::new(BOOST);
    boost.extend();

    // The extend happened at or before `now`, so the window closes no later
    // than now + 300s and no earlier than now + 299s (allowing for the gap
    // between the two calls).
    let now = Instant::now();
    assert!(boost.is_boosted_at(now));
    assert!(boost.is_boosted_at(now + Duration::from_secs(299)));
    assert!(!boost.is_boosted_at(now + Duration::from_secs(300)));
}

#[test]
fn test_repeated_extends_never_stack() {
    let boost = BoostController::new(BOOST);
    for _ in 0..10 {
        boost.extend();
    }

    let now = Instant::now();
    assert!(!boost.is_boosted_at(now + Duration::from_secs(300)));
    assert!(boost.remaining(now).unwrap() <= BOOST);
}

#[test]
fn test_extend_never_shortens_active_window() {
    let boost = BoostController::new(BOOST);
    boost.extend();
    let first = boost.remaining(Instant::now()).unwrap();

    boost.extend();
    let second = boost.remaining(Instant::now()).unwrap();

    // The second window restarts from now, so it can only end later.
    assert!(second >= first - Duration::from_secs(1));
}

#[test]
fn test_concurrent_extend_and_read() {
    let boost = Arc::new(BoostController::new(BOOST));

    let writer = {
        let boost = Arc::clone(&boost);
        thread::spawn(move || {
            for _ in 0..1000 {
                boost.extend();
            }
        })
    };

    for _ in 0..1000 {
        // A reader must always observe a coherent expiry.
        let _ = boost.is_boosted();
        let _ = boost.remaining(Instant::now());
    }

    writer.join().unwrap();
    assert!(boost.is_boosted());
}
