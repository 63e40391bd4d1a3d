use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::{
    BoostController, JsonlRecorder, LogRecord, Mark, MarkHistory, Sampler, SnapshotCell,
    StatusSnapshot, TrackerConfig,
};
use crate::probes::SystemProbes;

use super::event::TrackerEvent;
use super::render::render_ui;

/// How long the input path waits for a key press between redraws
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Dashboard state owned by the input/presentation thread
pub struct DashboardApp {
    pub snapshot: StatusSnapshot,
    /// Immediate mark confirmation, set directly on the keypress rather than
    /// through the snapshot path
    pub confirmation: Option<String>,
    pub should_quit: bool,
}

impl DashboardApp {
    pub fn new(snapshot: StatusSnapshot) -> Self {
        Self {
            snapshot,
            confirmation: None,
            should_quit: false,
        }
    }
}

/// Scoped raw-mode acquisition. Restoration happens in `drop` so every exit
/// path (quit, error, unwind) puts the terminal back exactly once.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen)
            .context("Failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Run the tracker: the sampler thread plus the dashboard/input loop.
///
/// The sampler is detached and dies with the process; the dashboard thread
/// owns the terminal and the process lifetime.
pub fn run_tracker_app(config: TrackerConfig) -> Result<()> {
    let boost = Arc::new(BoostController::new(config.boost_duration));
    let marks = Arc::new(MarkHistory::new(config.mark_capacity));
    let recorder = Arc::new(
        JsonlRecorder::open(&config.log_path)
            .with_context(|| format!("Failed to open log file {:?}", config.log_path))?,
    );
    let snapshots = SnapshotCell::new(StatusSnapshot::initial(
        Local::now(),
        config.normal_interval,
    ));

    // Persistence failures inside the sampler are fatal and come back over
    // this channel; everything else degrades in place.
    let (fatal_tx, fatal_rx) = mpsc::channel();
    {
        let sampler = Sampler::new(
            config.clone(),
            Box::new(SystemProbes::new(config.clone())),
            Arc::clone(&boost),
            Arc::clone(&marks),
            Arc::clone(&recorder),
            snapshots.clone(),
        );
        thread::Builder::new()
            .name("sampler".to_string())
            .spawn(move || {
                if let Err(err) = sampler.run() {
                    let _ = fatal_tx.send(err);
                }
            })
            .context("Failed to spawn sampler thread")?;
    }

    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = DashboardApp::new(snapshots.latest());

    loop {
        app.snapshot = snapshots.latest();
        terminal.draw(|frame| render_ui(frame, &app))?;

        if let Ok(err) = fatal_rx.try_recv() {
            return Err(err).context("Sampler thread failed");
        }

        if event::poll(POLL_INTERVAL).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    let tracker_event = match key.code {
                        KeyCode::Char('m') => TrackerEvent::Mark,
                        KeyCode::Char('q') | KeyCode::Esc => TrackerEvent::Quit,
                        _ => TrackerEvent::None,
                    };
                    handle_event(&mut app, tracker_event, &boost, &marks, &recorder)?;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Apply one input event. A mark extends the boost window, appends to the
/// mark history, persists a mark record, and confirms immediately.
fn handle_event(
    app: &mut DashboardApp,
    event: TrackerEvent,
    boost: &BoostController,
    marks: &MarkHistory,
    recorder: &JsonlRecorder,
) -> Result<()> {
    match event {
        TrackerEvent::Mark => {
            let mark = Mark::new(Local::now());
            boost.extend();
            marks.record(mark.clone());
            recorder
                .append(&LogRecord::Mark(mark.clone()))
                .context("Failed to append mark record")?;
            app.confirmation = Some(format!(
                "[{}] Manual mark logged.",
                mark.timestamp.format("%H:%M:%S")
            ));
        }
        TrackerEvent::Quit => app.should_quit = true,
        TrackerEvent::None => {}
    }

    Ok(())
}
