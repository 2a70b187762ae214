//! Plain-text rendering shared by the commands.

use std::fmt::Write;

use visionquest_core::{LogSummary, SessionLog, TargetFrame};

const TRACK_WIDTH: usize = 41;

/// Session log as a fixed-width table.
pub fn log_table(log: &SessionLog) -> String {
    if log.is_empty() {
        return "no sessions recorded\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<16}  {:<18}  {:<12}  {:>5}  {:>13}  {:>13}",
        "#", "date", "exercise", "patient", "score", "npc pre/post", "npa pre/post"
    );
    for (i, r) in log.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<16}  {:<18}  {:<12}  {:>4}%  {:>5.1} / {:<5.1}  {:>5.1} / {:<5.1}",
            i + 1,
            r.recorded_at().format("%Y-%m-%d %H:%M"),
            r.exercise().label(),
            truncate(&r.patient().name, 12),
            r.composite(),
            r.pre().npc_cm(),
            r.post().npc_cm(),
            r.pre().npa_cm(),
            r.post().npa_cm(),
        );
    }
    out
}

pub fn summary_text(summary: &LogSummary) -> String {
    let mut out = format!("sessions: {}\n", summary.count);
    if let Some(mean) = summary.mean_score {
        let _ = writeln!(out, "average score: {mean:.1}%");
    }
    if let Some(max) = summary.max_score {
        let _ = writeln!(out, "best score: {max}%");
    }
    if let Some(kind) = summary.most_frequent_exercise {
        let _ = writeln!(out, "most practiced: {}", kind.label());
    }
    if let Some(delta) = summary.measurement_delta {
        let _ = writeln!(
            out,
            "npc change: {:+.1} cm, npa change: {:+.1} cm",
            delta.npc_cm, delta.npa_cm
        );
    }
    out
}

/// One-line picture of the target pair on a horizontal track.
pub fn frame_line(frame: &TargetFrame, glyph: &str) -> String {
    let half = (TRACK_WIDTH / 2) as f64;
    let center = half + frame.x * half / 2.0;
    let offset = frame.separation * half / 2.0;
    let left = (center - offset).round().clamp(0.0, (TRACK_WIDTH - 1) as f64) as usize;
    let right = (center + offset).round().clamp(0.0, (TRACK_WIDTH - 1) as f64) as usize;

    let mut cells = vec!["·".to_string(); TRACK_WIDTH];
    cells[left] = glyph.to_string();
    cells[right] = glyph.to_string();
    format!("|{}| x{:.2}", cells.concat(), frame.scale)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
