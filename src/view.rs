use crate::models::{Event, MagnitudeBand, ScreenPosition, StatsSummary};

/// Seven-way step function over magnitude. Thresholds are strict
/// less-than, so exactly 2.0 is light, not minor. Total over finite
/// input; callers must not pass NaN or infinities.
pub fn classify_magnitude(magnitude: f64) -> MagnitudeBand {
    if magnitude < 1.0 {
        MagnitudeBand::Micro
    } else if magnitude < 2.0 {
        MagnitudeBand::Minor
    } else if magnitude < 3.0 {
        MagnitudeBand::Light
    } else if magnitude < 4.0 {
        MagnitudeBand::Moderate
    } else if magnitude < 5.0 {
        MagnitudeBand::Strong
    } else if magnitude < 6.0 {
        MagnitudeBand::Major
    } else {
        MagnitudeBand::Great
    }
}

/// Marker diameter in viewport units. The floor of 8 keeps even
/// magnitude ≤ 2 events visible on the overlay.
pub fn visual_weight(magnitude: f64) -> f64 {
    (magnitude * 4.0).max(8.0)
}

/// Equirectangular projection onto percentage offsets. Clamping keeps the
/// result inside the viewport even for boundary or out-of-range input
/// (lon = 180 lands on x = 100, not past it).
pub fn project(latitude: f64, longitude: f64) -> ScreenPosition {
    ScreenPosition {
        x: (((longitude + 180.0) / 360.0) * 100.0).clamp(0.0, 100.0),
        y: (((90.0 - latitude) / 180.0) * 100.0).clamp(0.0, 100.0),
    }
}

/// Aggregate statistics over the full collection, recomputed from scratch
/// on every call. Ties on `time_ms` keep the first-encountered event.
pub fn summarize(events: &[Event]) -> StatsSummary {
    let mut band_counts = [0usize; 7];
    let mut max_magnitude: Option<f64> = None;
    let mut magnitude_sum = 0.0;
    let mut most_recent: Option<&Event> = None;

    for event in events {
        band_counts[classify_magnitude(event.magnitude).index()] += 1;
        magnitude_sum += event.magnitude;
        max_magnitude = Some(match max_magnitude {
            Some(m) => m.max(event.magnitude),
            None => event.magnitude,
        });
        match most_recent {
            Some(best) if event.time_ms <= best.time_ms => {}
            _ => most_recent = Some(event),
        }
    }

    let count = events.len();
    StatsSummary {
        count,
        band_counts,
        max_magnitude,
        mean_magnitude: if count > 0 {
            Some(magnitude_sum / count as f64)
        } else {
            None
        },
        most_recent: most_recent.cloned(),
    }
}
