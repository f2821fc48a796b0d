use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{ApiFeature, ApiFeed};
use crate::error::FeedError;
use crate::models::Event;

/// Fixed feed endpoint: every recorded event from the last 24 hours.
/// No auth, no query parameters.
pub const FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";

/// Fetch and normalize the current event collection from the fixed feed.
pub async fn fetch_events(client: &Client) -> Result<Vec<Event>, FeedError> {
    fetch_events_from(client, FEED_URL).await
}

/// Same operation with the endpoint injectable so tests can point it at a
/// mock server. One GET, no retry; the refresh timer provides recovery.
pub async fn fetch_events_from(client: &Client, url: &str) -> Result<Vec<Event>, FeedError> {
    let start = std::time::Instant::now();
    debug!("Fetching event feed - url={}", url);

    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        warn!("Feed returned non-success status - status={}", status);
        return Err(FeedError::Status(status));
    }

    let body = resp.text().await?;
    let feed: ApiFeed = serde_json::from_str(&body)?;

    let received = feed.features.len();
    let events = normalize_features(feed.features);

    info!(
        "Feed fetch completed - duration={:.2}s, received={}, usable={}",
        start.elapsed().as_secs_f32(),
        received,
        events.len()
    );
    Ok(events)
}

/// Map raw features onto the internal model, source order preserved.
/// Features without usable coordinates, magnitude, or timestamp are skipped
/// rather than failing the whole fetch; a two-element coordinate array just
/// loses its depth.
fn normalize_features(features: Vec<ApiFeature>) -> Vec<Event> {
    let mut events = Vec::with_capacity(features.len());
    for f in features {
        let Some(props) = f.properties else {
            warn!("Skipping feature without properties - id={}", f.id);
            continue;
        };
        let Some(geom) = f.geometry else {
            warn!("Skipping feature without geometry - id={}", f.id);
            continue;
        };
        let (Some(&longitude), Some(&latitude)) =
            (geom.coordinates.first(), geom.coordinates.get(1))
        else {
            warn!("Skipping feature with short coordinates - id={}", f.id);
            continue;
        };
        let Some(magnitude) = props.mag else {
            warn!("Skipping feature with null magnitude - id={}", f.id);
            continue;
        };
        let Some(time_ms) = props.time else {
            warn!("Skipping feature with no timestamp - id={}", f.id);
            continue;
        };

        // place is occasionally null upstream; the title carries the same text
        let place = props.place.or(props.title).unwrap_or_default();

        events.push(Event {
            id: f.id,
            longitude,
            latitude,
            depth_km: geom.coordinates.get(2).copied(),
            magnitude,
            place,
            time_ms,
            detail_url: props.url.unwrap_or_default(),
            event_type: props.event_type.unwrap_or_default(),
        });
    }
    events
}
