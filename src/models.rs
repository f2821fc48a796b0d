use serde::{Deserialize, Serialize};

/// One normalized seismic event. `id` is stable across refreshes for the
/// same physical event; a later fetch replaces the whole collection, so a
/// revised event simply arrives under the same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub longitude: f64,          // degrees, [-180, 180]
    pub latitude: f64,           // degrees, [-90, 90]
    pub depth_km: Option<f64>,   // absent in malformed input
    pub magnitude: f64,
    pub place: String,
    pub time_ms: i64,            // epoch millis, UTC
    pub detail_url: String,
    pub event_type: String,
}

/// Fixed seven-way magnitude classification with boundaries at 1..6.
/// The mapping is total over finite magnitudes; great is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeBand {
    Micro,
    Minor,
    Light,
    Moderate,
    Strong,
    Major,
    Great,
}

impl MagnitudeBand {
    pub const ALL: [MagnitudeBand; 7] = [
        MagnitudeBand::Micro,
        MagnitudeBand::Minor,
        MagnitudeBand::Light,
        MagnitudeBand::Moderate,
        MagnitudeBand::Strong,
        MagnitudeBand::Major,
        MagnitudeBand::Great,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MagnitudeBand::Micro => "micro",
            MagnitudeBand::Minor => "minor",
            MagnitudeBand::Light => "light",
            MagnitudeBand::Moderate => "moderate",
            MagnitudeBand::Strong => "strong",
            MagnitudeBand::Major => "major",
            MagnitudeBand::Great => "great",
        }
    }

    /// Canonical display color, low to high severity.
    pub fn color(self) -> &'static str {
        match self {
            MagnitudeBand::Micro => "#4caf50",
            MagnitudeBand::Minor => "#8bc34a",
            MagnitudeBand::Light => "#cddc39",
            MagnitudeBand::Moderate => "#ffc107",
            MagnitudeBand::Strong => "#ff9800",
            MagnitudeBand::Major => "#ff5722",
            MagnitudeBand::Great => "#b71c1c",
        }
    }

    /// (lower, upper) magnitude bounds; `None` means open-ended.
    /// Lower bounds are inclusive, upper bounds exclusive.
    pub fn bounds(self) -> (Option<f64>, Option<f64>) {
        match self {
            MagnitudeBand::Micro => (None, Some(1.0)),
            MagnitudeBand::Minor => (Some(1.0), Some(2.0)),
            MagnitudeBand::Light => (Some(2.0), Some(3.0)),
            MagnitudeBand::Moderate => (Some(3.0), Some(4.0)),
            MagnitudeBand::Strong => (Some(4.0), Some(5.0)),
            MagnitudeBand::Major => (Some(5.0), Some(6.0)),
            MagnitudeBand::Great => (Some(6.0), None),
        }
    }

    /// Position in `ALL`, used to index per-band count arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Percentage offsets into a rectangular viewport, both in [0, 100].
/// Derived per render, never stored on the event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

/// Aggregates over the current event collection. The per-band counts sum
/// to `count`; max/mean/most_recent are `None` for an empty collection.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    pub band_counts: [usize; 7],
    pub max_magnitude: Option<f64>,
    pub mean_magnitude: Option<f64>,
    pub most_recent: Option<Event>,
}

impl StatsSummary {
    pub fn band_count(&self, band: MagnitudeBand) -> usize {
        self.band_counts[band.index()]
    }
}
