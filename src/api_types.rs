use serde::{Deserialize, Serialize};

/// Top-level USGS GeoJSON summary document. A body with no `features`
/// field decodes as an empty feed rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFeed {
    #[serde(default)]
    pub features: Vec<ApiFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFeature {
    pub id: String,
    #[serde(default)]
    pub geometry: Option<ApiGeometry>,
    #[serde(default)]
    pub properties: Option<ApiProperties>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiGeometry {
    // [lon, lat, depth_km]; depth is sometimes missing upstream
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProperties {
    pub mag: Option<f64>,           // null on some provisional events
    #[serde(default)]
    pub place: Option<String>,      // "12 km SSE of Ridgecrest, CA"
    pub time: Option<i64>,          // epoch millis, UTC
    #[serde(default)]
    pub url: Option<String>,        // authoritative event page
    #[serde(default)]
    pub title: Option<String>,      // "M 4.2 - 12 km SSE of Ridgecrest, CA"
    #[serde(rename = "type", default)]
    pub event_type: Option<String>, // "earthquake" | "quarry blast" | ...
}
