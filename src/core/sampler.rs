//! The sampling state machine.
//!
//! One sampler thread loops Sampling → CountingDown forever. During Sampling
//! a short-lived ticker thread refreshes the elapsed-time indicator while the
//! probes block; it is signaled and joined before the cycle's measurement is
//! assembled, so no stale in-progress frame outlives the cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;

use crate::error::Result;
use crate::probes::ProbeSet;

use super::boost::BoostController;
use super::config::TrackerConfig;
use super::marks::MarkHistory;
use super::record::{LogRecord, Measurement};
use super::recorder::JsonlRecorder;
use super::status::{Indicator, SnapshotCell, StatusSnapshot};

/// Incremental mean over cycle durations; only the mean is ever read.
#[derive(Debug, Default)]
struct DurationStats {
    sum_ms: u64,
    count: u64,
}

impl DurationStats {
    fn push(&mut self, ms: u64) {
        self.sum_ms += ms;
        self.count += 1;
    }

    fn mean_ms(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            self.sum_ms / self.count
        }
    }
}

/// Runs the endless measure/persist/count-down cycle and publishes status
/// snapshots.
///
/// All sampler state other than the boost expiry and the mark history is
/// owned by this thread exclusively.
pub struct Sampler {
    config: TrackerConfig,
    probes: Box<dyn ProbeSet>,
    boost: Arc<BoostController>,
    marks: Arc<MarkHistory>,
    recorder: Arc<JsonlRecorder>,
    snapshots: SnapshotCell,
    durations: DurationStats,
    samples_taken: u64,
    last_sample_mono: Option<Instant>,
    last_measurement: Option<Measurement>,
}

impl Sampler {
    pub fn new(
        config: TrackerConfig,
        probes: Box<dyn ProbeSet>,
        boost: Arc<BoostController>,
        marks: Arc<MarkHistory>,
        recorder: Arc<JsonlRecorder>,
        snapshots: SnapshotCell,
    ) -> Self {
        Self {
            config,
            probes,
            boost,
            marks,
            recorder,
            snapshots,
            durations: DurationStats::default(),
            samples_taken: 0,
            last_sample_mono: None,
            last_measurement: None,
        }
    }

    /// Run forever. Only persistence failures escape; probe failures degrade
    /// to sentinel values inside the cycle.
    pub fn run(mut self) -> Result<()> {
        // Publish a zero-count snapshot before the first cycle so the
        // dashboard has something to show immediately.
        self.snapshots.publish(StatusSnapshot::initial(
            Local::now(),
            self.config.normal_interval,
        ));

        loop {
            self.run_cycle()?;
            self.countdown();
        }
    }

    /// One full pass of the Sampling state: collect, persist, publish.
    pub fn run_cycle(&mut self) -> Result<()> {
        let started_mono = Instant::now();
        let started_wall = Local::now();

        // Boost is read once per cycle; the same reading gates the widened
        // reachability set (extra sites only when the cycle starts
        // un-boosted).
        let boosted = self.boost.is_boosted_at(started_mono);

        let since_last = self
            .last_sample_mono
            .map(|t| started_mono.duration_since(t))
            .unwrap_or_default();

        let ticker = IndicatorTicker::spawn(
            self.snapshots.clone(),
            self.build_snapshot(since_last, Duration::ZERO, None),
            Arc::clone(&self.boost),
            Arc::clone(&self.marks),
            started_mono,
            self.config.indicator_tick,
        );

        let vpn_status = self.probes.vpn();
        let (ping_ms, packet_loss_pct) = self.probes.ping();
        let (download_mbps, upload_mbps) = self.probes.throughput();
        let wifi_signal_dbm = self.probes.wifi_signal();
        let failed_sites = self.probes.reachability(!boosted);

        // Stop AND join the ticker before assembling the measurement; a
        // requested-but-unjoined stop could still publish a stale frame.
        ticker.stop();

        let duration_ms = started_mono.elapsed().as_millis() as u64;
        let measurement = Measurement {
            timestamp: started_wall,
            vpn_status,
            ping_ms,
            packet_loss_pct,
            download_mbps,
            upload_mbps,
            wifi_signal_dbm,
            failed_sites,
            duration_ms,
        };

        self.durations.push(duration_ms);
        self.samples_taken += 1;
        self.last_sample_mono = Some(started_mono);

        self.recorder
            .append(&LogRecord::Measurement(measurement.clone()))?;

        if self.config.verbose {
            log::info!(
                "sample #{}: vpn={:?} ping={:.1}ms loss={:.1}% down={:.1}Mbps up={:.1}Mbps \
                 wifi={:?} failed={:?} took {}ms",
                self.samples_taken,
                measurement.vpn_status,
                measurement.ping_ms,
                measurement.packet_loss_pct,
                measurement.download_mbps,
                measurement.upload_mbps,
                measurement.wifi_signal_dbm,
                measurement.failed_sites,
                duration_ms,
            );
        }

        self.last_measurement = Some(measurement);
        self.publish(Duration::from_millis(duration_ms), Duration::ZERO);

        Ok(())
    }

    /// The CountingDown state. The interval is decided once on entry; boost
    /// flips during the wait do not change it.
    fn countdown(&mut self) {
        let interval = self.config.interval_for(self.boost.is_boosted());

        loop {
            let since = self
                .last_sample_mono
                .map(|t| t.elapsed())
                .unwrap_or_default();
            if since >= interval {
                break;
            }

            self.publish(since, interval - since);
            thread::sleep(Duration::from_secs(1).min(interval - since));
        }
    }

    fn publish(&self, since: Duration, until: Duration) {
        self.snapshots.publish(self.build_snapshot(since, until, None));
    }

    fn build_snapshot(
        &self,
        since: Duration,
        until: Duration,
        indicator: Option<Indicator>,
    ) -> StatusSnapshot {
        let now_mono = Instant::now();
        let (recent_marks, total_marks) = self.marks.snapshot();

        StatusSnapshot {
            now: Local::now(),
            boosted: self.boost.is_boosted_at(now_mono),
            boost_remaining_secs: self.boost.remaining(now_mono).map(|d| d.as_secs()),
            samples_taken: self.samples_taken,
            since_last_secs: since.as_secs(),
            until_next_secs: until.as_secs(),
            avg_duration_ms: self.durations.mean_ms(),
            last: self.last_measurement.clone(),
            recent_marks,
            total_marks,
            indicator,
        }
    }
}

/// Publishes elapsed-time frames at a fast tick while a cycle is collecting.
///
/// The ticker never probes; it refreshes the clock, boost/mark state, and the
/// elapsed counter off the cycle's monotonic start.
struct IndicatorTicker {
    stop: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

impl IndicatorTicker {
    fn spawn(
        snapshots: SnapshotCell,
        template: StatusSnapshot,
        boost: Arc<BoostController>,
        marks: Arc<MarkHistory>,
        started: Instant,
        tick: Duration,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                let now_mono = Instant::now();
                let (recent_marks, total_marks) = marks.snapshot();

                let mut frame = template.clone();
                frame.now = Local::now();
                frame.boosted = boost.is_boosted_at(now_mono);
                frame.boost_remaining_secs = boost.remaining(now_mono).map(|d| d.as_secs());
                frame.recent_marks = recent_marks;
                frame.total_marks = total_marks;
                frame.indicator = Some(Indicator {
                    label: "Sampling…".to_string(),
                    elapsed_ms: started.elapsed().as_millis() as u64,
                });

                snapshots.publish(frame);
                thread::sleep(tick);
            }
        });

        Self { stop, handle }
    }

    /// Signal and join; returns only after the last frame has been published.
    fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.handle.join();
    }
}
