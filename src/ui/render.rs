use chrono::TimeDelta;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::core::record::Measurement;
use crate::core::status::StatusSnapshot;

use super::dashboard::DashboardApp;
use super::widgets::{loss_color, spinner_frame, wifi_color};

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &DashboardApp) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),  // Status summary
            Constraint::Length(13), // Latest sample
            Constraint::Min(4),     // Recent marks
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    render_status(frame, &app.snapshot, chunks[0]);
    render_sample(frame, &app.snapshot, chunks[1]);
    render_marks(frame, &app.snapshot, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

fn render_status(frame: &mut Frame, snapshot: &StatusSnapshot, area: Rect) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("Status Summary")
        .title_style(Style::default().fg(Color::Cyan).bold())
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(3, 7),
            Constraint::Ratio(2, 7),
            Constraint::Ratio(2, 7),
        ])
        .split(inner);

    let metrics = vec![
        metric_line("Time", snapshot.now.format("%H:%M:%S").to_string(), Color::Cyan),
        metric_line("Samples", snapshot.samples_taken.to_string(), Color::Green),
        metric_line("Since", format!("{}s", snapshot.since_last_secs), Color::Yellow),
        metric_line("Until", format!("{}s", snapshot.until_next_secs), Color::Yellow),
        metric_line("AvgDur", format!("{}ms", snapshot.avg_duration_ms), Color::Cyan),
        metric_line("Marks", snapshot.total_marks.to_string(), Color::Green),
    ];
    frame.render_widget(Paragraph::new(metrics), columns[0]);

    let indicator = match &snapshot.indicator {
        Some(ind) => Line::from(vec![
            Span::styled(spinner_frame(ind.elapsed_ms), Style::default().fg(Color::Magenta)),
            Span::raw(" "),
            Span::styled(
                format!("{} {}ms", ind.label, ind.elapsed_ms),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        None => Line::default(),
    };
    frame.render_widget(
        Paragraph::new(indicator).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        ),
        columns[1],
    );

    let mut state_lines = vec![
        Line::from(vec![
            Span::raw("VPN: "),
            match snapshot.last.as_ref().map(|m| m.vpn_status.is_on()) {
                Some(true) => Span::styled("ON", Style::default().fg(Color::Green)),
                Some(false) => Span::styled("OFF", Style::default().fg(Color::Red)),
                None => Span::styled("—", Style::default().fg(Color::DarkGray)),
            },
        ]),
        Line::from(vec![
            Span::raw("Boosted: "),
            if snapshot.boosted {
                Span::styled("yes", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("no", Style::default().fg(Color::Red))
            },
        ]),
    ];
    if let Some(remaining) = snapshot.boost_remaining_secs {
        state_lines.push(Line::from(vec![
            Span::raw("Ends in: "),
            Span::styled(format!("{}s", remaining), Style::default().fg(Color::Magenta)),
        ]));
    }
    frame.render_widget(
        Paragraph::new(state_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        columns[2],
    );
}

fn render_sample(frame: &mut Frame, snapshot: &StatusSnapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Latest Sample")
        .title_style(Style::default().fg(Color::Green).bold())
        .border_style(Style::default().fg(Color::Green));

    let lines = match &snapshot.last {
        Some(measurement) => sample_lines(measurement),
        None => vec![Line::from(Span::styled(
            "No samples yet",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn sample_lines(measurement: &Measurement) -> Vec<Line<'static>> {
    let end = measurement.timestamp + TimeDelta::milliseconds(measurement.duration_ms as i64);

    let ping = if measurement.ping_ms > 0.0 {
        Span::styled(
            format!("{:.1}ms", measurement.ping_ms),
            Style::default().fg(Color::Cyan),
        )
    } else {
        Span::styled("—", Style::default().fg(Color::DarkGray))
    };

    let loss = if measurement.packet_loss_pct > 0.0 {
        Span::styled(
            format!("{:.1}%", measurement.packet_loss_pct),
            Style::default().fg(loss_color(measurement.packet_loss_pct)),
        )
    } else {
        Span::styled("0%", Style::default().fg(Color::DarkGray))
    };

    let down = throughput_span(measurement.download_mbps);
    let up = throughput_span(measurement.upload_mbps);

    let wifi = match measurement.wifi_signal_dbm {
        Some(dbm) => Span::styled(
            format!("{} dBm", dbm),
            Style::default().fg(wifi_color(dbm)),
        ),
        None => Span::styled("—", Style::default().fg(Color::DarkGray)),
    };

    let mut lines = vec![
        metric_line("Start", measurement.timestamp.format("%H:%M:%S").to_string(), Color::Cyan),
        metric_line("End", end.format("%H:%M:%S").to_string(), Color::Cyan),
        metric_line("Dur", format!("{}ms", measurement.duration_ms), Color::Green),
        labeled_line("Ping", ping),
        labeled_line("Loss", loss),
        labeled_line("Down", down),
        labeled_line("Up", up),
        labeled_line("Wi-Fi", wifi),
    ];

    if measurement.failed_sites.is_empty() {
        lines.push(labeled_line(
            "Fail",
            Span::styled("—", Style::default().fg(Color::Green)),
        ));
    } else {
        lines.push(labeled_line(
            "Fail",
            Span::styled(
                measurement.failed_sites.join(", "),
                Style::default().fg(Color::Yellow),
            ),
        ));
    }

    lines
}

fn render_marks(frame: &mut Frame, snapshot: &StatusSnapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Recent Marks")
        .title_style(Style::default().fg(Color::Yellow).bold())
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines: Vec<Line> = if snapshot.recent_marks.is_empty() {
        vec![Line::from(Span::styled(
            "No marks yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        snapshot
            .recent_marks
            .iter()
            .map(|mark| {
                Line::from(Span::styled(
                    format!("[{}] {}", mark.timestamp.format("%H:%M:%S"), mark.note),
                    Style::default().fg(Color::Magenta),
                ))
            })
            .collect()
    };

    let overflow = snapshot
        .total_marks
        .saturating_sub(snapshot.recent_marks.len() as u64);
    if overflow > 0 {
        lines.push(Line::from(Span::styled(
            format!("... ({} more omitted)", overflow),
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let line = match &app.confirmation {
        Some(confirmation) => Line::from(Span::styled(
            confirmation.clone(),
            Style::default().fg(Color::Magenta),
        )),
        None => Line::from(Span::styled(
            " m mark · q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn throughput_span(mbps: f64) -> Span<'static> {
    if mbps > 0.0 {
        Span::styled(
            format!("{:.1} Mbps", mbps),
            Style::default().fg(Color::Blue),
        )
    } else {
        Span::styled("—", Style::default().fg(Color::DarkGray))
    }
}

fn metric_line(label: &str, value: String, color: Color) -> Line<'static> {
    labeled_line(label, Span::styled(value, Style::default().fg(color)))
}

fn labeled_line(label: &str, value: Span<'static>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<8}", label), Style::default().fg(Color::White)),
        value,
    ])
}
