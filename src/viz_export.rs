use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::{fs, path::Path};

use crate::models::{Event, MagnitudeBand, StatsSummary};
use crate::view::{classify_magnitude, project, visual_weight};

/* -------------------------------------------------------------------------- */
/* Entry point                                                                */
/* -------------------------------------------------------------------------- */

/// Write the D3-ready overlay bundle for the current collection into
/// `out_dir`. The bundle is a snapshot: each refresh overwrites it in full,
/// mirroring the wholesale collection swap.
pub fn write_all_viz(
    out_dir: &Path,
    events: &[Event],
    summary: &StatsSummary,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;

    let markers = build_markers(events);
    write_json(out_dir.join("viz.markers.json"), &markers)?;

    let legend = build_legend(summary);
    write_json(out_dir.join("viz.legend.json"), &legend)?;

    write_json(out_dir.join("viz.stats.json"), summary)?;

    let idx = json!({
        "generated_at": generated_at.to_rfc3339(),
        "version": 1,
        "counts": { "events": events.len() },
        "files": [
            "viz.markers.json",
            "viz.legend.json",
            "viz.stats.json"
        ]
    });
    write_json(out_dir.join("viz.index.json"), &idx)?;

    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .map(|_| ())
        .map_err(|e| e.into())
}

/* -------------------------------------------------------------------------- */
/* Markers                                                                    */
/* -------------------------------------------------------------------------- */

#[derive(Serialize)]
struct VMarker {
    id: String,
    x: f64,    // percent offsets into the viewport
    y: f64,
    size: f64, // marker diameter
    band: &'static str,
    color: &'static str,
    magnitude: f64,
    depth_km: Option<f64>,
    place: String,
    detail_url: String,
    time_ms: i64,
    event_type: String,
}

fn build_markers(events: &[Event]) -> Vec<VMarker> {
    events
        .iter()
        .map(|e| {
            let pos = project(e.latitude, e.longitude);
            let band = classify_magnitude(e.magnitude);
            VMarker {
                id: e.id.clone(),
                x: pos.x,
                y: pos.y,
                size: visual_weight(e.magnitude),
                band: band.label(),
                color: band.color(),
                magnitude: e.magnitude,
                depth_km: e.depth_km,
                place: e.place.clone(),
                detail_url: e.detail_url.clone(),
                time_ms: e.time_ms,
                event_type: e.event_type.clone(),
            }
        })
        .collect()
}

/* -------------------------------------------------------------------------- */
/* Legend                                                                     */
/* -------------------------------------------------------------------------- */

#[derive(Serialize)]
struct VLegendEntry {
    band: &'static str,
    color: &'static str,
    min_magnitude: Option<f64>, // inclusive; None = open-ended
    max_magnitude: Option<f64>, // exclusive; None = open-ended
    count: usize,
}

fn build_legend(summary: &StatsSummary) -> Vec<VLegendEntry> {
    MagnitudeBand::ALL
        .into_iter()
        .map(|band| {
            let (min_magnitude, max_magnitude) = band.bounds();
            VLegendEntry {
                band: band.label(),
                color: band.color(),
                min_magnitude,
                max_magnitude,
                count: summary.band_count(band),
            }
        })
        .collect()
}
