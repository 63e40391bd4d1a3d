use ratatui::prelude::*;

/// Get color for a packet-loss percentage
pub fn loss_color(loss_pct: f64) -> Color {
    match loss_pct {
        l if l > 1.0 => Color::Red,
        l if l > 0.0 => Color::Yellow,
        _ => Color::Green,
    }
}

/// Get color for a Wi-Fi signal level in dBm
pub fn wifi_color(dbm: i32) -> Color {
    match dbm {
        d if d > -60 => Color::Green,
        d if d > -75 => Color::Yellow,
        _ => Color::Red,
    }
}

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame derived from the indicator's elapsed time, so the animation
/// advances with each published frame.
pub fn spinner_frame(elapsed_ms: u64) -> &'static str {
    SPINNER_FRAMES[(elapsed_ms / 100) as usize % SPINNER_FRAMES.len()]
}
