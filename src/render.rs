use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Event, MagnitudeBand, StatsSummary};
use crate::state::DashboardState;
use crate::view::{project, visual_weight};

/// Number of strongest events listed under the stats panel.
const TOP_EVENTS: usize = 5;

/// Render the text stats panel for one refresh cycle: totals, band legend,
/// the strongest events with their projected overlay positions, and the
/// error notice when the last fetch failed.
pub fn render_dashboard_text(state: &DashboardState, summary: &StatsSummary, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("== Quake Watch - last 24 hours ==\n");

    match state.last_updated() {
        Some(at) => out.push_str(&format!(
            "Updated {} ({})\n",
            at.format("%Y-%m-%d %H:%M:%S UTC"),
            format_age(now, at.timestamp_millis())
        )),
        None => out.push_str("No successful fetch yet\n"),
    }
    if state.is_loading() {
        out.push_str("Refreshing...\n");
    }
    if let Some(err) = state.last_error() {
        out.push_str(&format!("! Last refresh failed: {} (showing previous data)\n", err));
    }

    out.push_str(&format!(
        "\nEvents: {}   Max: {}   Mean: {}\n",
        summary.count,
        format_magnitude(summary.max_magnitude),
        format_magnitude(summary.mean_magnitude)
    ));

    if let Some(latest) = &summary.most_recent {
        out.push_str(&format!(
            "Most recent: M {:.1} {} ({})\n",
            latest.magnitude,
            latest.place,
            format_age(now, latest.time_ms)
        ));
    }

    out.push_str("\nMagnitude bands:\n");
    for band in MagnitudeBand::ALL {
        out.push_str(&format!(
            "  {:<9} {:<10} {:>5}\n",
            band.label(),
            band_range_label(band),
            summary.band_count(band)
        ));
    }

    let strongest = strongest_events(state.events(), TOP_EVENTS);
    if !strongest.is_empty() {
        out.push_str("\nStrongest events:\n");
        for e in strongest {
            let pos = project(e.latitude, e.longitude);
            out.push_str(&format!(
                "  M {:<4.1} {:<44} x={:>5.1} y={:>5.1} size={:>4.1} {}\n",
                e.magnitude,
                truncate(&e.place, 44),
                pos.x,
                pos.y,
                visual_weight(e.magnitude),
                format_age(now, e.time_ms)
            ));
        }
    }

    out
}

/// Top n events by magnitude, descending; source order breaks ties.
fn strongest_events(events: &[Event], n: usize) -> Vec<&Event> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by(|a, b| {
        b.magnitude
            .partial_cmp(&a.magnitude)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}

fn band_range_label(band: MagnitudeBand) -> String {
    match band.bounds() {
        (None, Some(hi)) => format!("< {hi:.1}"),
        (Some(lo), Some(hi)) => format!("{lo:.1} - {hi:.1}"),
        (Some(lo), None) => format!(">= {lo:.1}"),
        (None, None) => String::new(),
    }
}

fn format_magnitude(m: Option<f64>) -> String {
    match m {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

/// Compact relative age, e.g. "42s ago", "12m ago", "3h ago".
pub fn format_age(now: DateTime<Utc>, time_ms: i64) -> String {
    let then = match Utc.timestamp_millis_opt(time_ms).single() {
        Some(t) => t,
        None => return "?".to_string(),
    };
    let secs = (now - then).num_seconds();
    if secs < 0 {
        return "just now".to_string();
    }
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::summarize;
    use chrono::TimeZone;

    fn test_event(id: &str, magnitude: f64, time_ms: i64) -> Event {
        Event {
            id: id.to_string(),
            longitude: 0.0,
            latitude: 0.0,
            depth_km: Some(5.0),
            magnitude,
            place: format!("near {id}"),
            time_ms,
            detail_url: String::new(),
            event_type: "earthquake".to_string(),
        }
    }

    #[test]
    fn panel_shows_totals_bands_and_strongest() {
        let now = Utc.timestamp_millis_opt(1_000_000).unwrap();
        let mut state = DashboardState::new();
        state.begin_refresh();
        state.complete_refresh(
            vec![
                test_event("a", 2.5, 100),
                test_event("b", 5.1, 300),
                test_event("c", 1.0, 200),
            ],
            now,
        );
        let summary = summarize(state.events());
        let panel = render_dashboard_text(&state, &summary, now);

        assert!(panel.contains("Events: 3"));
        assert!(panel.contains("Max: 5.10"));
        assert!(panel.contains("Most recent: M 5.1 near b"));
        assert!(panel.contains("major"));
        assert!(panel.contains("Strongest events:"));
        // strongest first
        let strongest_idx = panel.find("M 5.1  near b").unwrap();
        let weaker_idx = panel.find("M 2.5  near a").unwrap();
        assert!(strongest_idx < weaker_idx);
    }

    #[test]
    fn panel_reports_failure_over_previous_data() {
        let now = Utc::now();
        let mut state = DashboardState::new();
        state.begin_refresh();
        state.complete_refresh(vec![test_event("a", 3.0, 100)], now);
        state.begin_refresh();
        state.fail_refresh(&crate::error::FeedError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        ));

        let summary = summarize(state.events());
        let panel = render_dashboard_text(&state, &summary, now);
        assert!(panel.contains("Last refresh failed"));
        assert!(panel.contains("Events: 1"));
    }

    #[test]
    fn empty_state_renders_without_aggregates() {
        let state = DashboardState::new();
        let summary = summarize(state.events());
        let panel = render_dashboard_text(&state, &summary, Utc::now());
        assert!(panel.contains("No successful fetch yet"));
        assert!(panel.contains("Events: 0"));
        assert!(panel.contains("Max: -"));
        assert!(!panel.contains("Most recent:"));
    }

    #[test]
    fn age_formatting_picks_the_right_unit() {
        let now = Utc.timestamp_millis_opt(10_000_000_000).unwrap();
        assert_eq!(format_age(now, 10_000_000_000 - 30_000), "30s ago");
        assert_eq!(format_age(now, 10_000_000_000 - 120_000), "2m ago");
        assert_eq!(format_age(now, 10_000_000_000 - 7_200_000), "2h ago");
        assert_eq!(format_age(now, 10_000_000_000 + 5_000), "just now");
    }
}
