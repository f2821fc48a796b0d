use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::FeedError;
use crate::models::Event;

/// Process-wide dashboard state, scoped to the active refresh loop and
/// passed explicitly to rendering and polling code. Lifecycle: starts
/// empty, populated on the first successful fetch, replaced wholesale on
/// each subsequent refresh, dropped on teardown.
#[derive(Debug, Default)]
pub struct DashboardState {
    events: Vec<Event>,
    in_flight: bool,
    last_error: Option<String>,
    last_updated: Option<DateTime<Utc>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Single-flight guard: marks a refresh as in flight, or refuses when
    /// one already is. A refused tick changes nothing and the caller
    /// simply waits for the next one.
    pub fn begin_refresh(&mut self) -> bool {
        if self.in_flight {
            debug!("Refresh already in flight - tick ignored");
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Swap in a freshly fetched collection. The old collection is
    /// discarded in full; there is no merge.
    pub fn complete_refresh(&mut self, events: Vec<Event>, fetched_at: DateTime<Utc>) {
        self.events = events;
        self.in_flight = false;
        self.last_error = None;
        self.last_updated = Some(fetched_at);
    }

    /// Record a failed fetch. The previous collection stays untouched so
    /// the dashboard keeps showing the last good data alongside a notice.
    pub fn fail_refresh(&mut self, err: &FeedError) {
        self.in_flight = false;
        self.last_error = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn test_event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            longitude: 10.0,
            latitude: 20.0,
            depth_km: None,
            magnitude: 3.3,
            place: "test".to_string(),
            time_ms: 1,
            detail_url: String::new(),
            event_type: "earthquake".to_string(),
        }
    }

    #[test]
    fn starts_empty_and_idle() {
        let state = DashboardState::new();
        assert!(state.events().is_empty());
        assert!(!state.is_loading());
        assert!(state.last_error().is_none());
        assert!(state.last_updated().is_none());
    }

    #[test]
    fn single_flight_guard_refuses_second_begin() {
        let mut state = DashboardState::new();
        assert!(state.begin_refresh());
        assert!(!state.begin_refresh());

        state.complete_refresh(vec![], Utc::now());
        assert!(state.begin_refresh());
    }

    #[test]
    fn complete_refresh_swaps_wholesale_and_clears_error() {
        let mut state = DashboardState::new();
        state.begin_refresh();
        state.fail_refresh(&FeedError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(state.last_error().is_some());

        state.begin_refresh();
        state.complete_refresh(vec![test_event("a"), test_event("b")], Utc::now());
        assert_eq!(state.events().len(), 2);
        assert!(state.last_error().is_none());
        assert!(state.last_updated().is_some());

        // a later fetch replaces, never merges
        state.begin_refresh();
        state.complete_refresh(vec![test_event("c")], Utc::now());
        assert_eq!(state.events().len(), 1);
        assert_eq!(state.events()[0].id, "c");
    }

    #[test]
    fn fail_refresh_keeps_previous_events() {
        let mut state = DashboardState::new();
        state.begin_refresh();
        state.complete_refresh(vec![test_event("keep")], Utc::now());
        let stamped = state.last_updated();

        state.begin_refresh();
        state.fail_refresh(&FeedError::Status(StatusCode::BAD_GATEWAY));
        assert_eq!(state.events().len(), 1);
        assert_eq!(state.events()[0].id, "keep");
        assert_eq!(state.last_updated(), stamped);
        assert!(!state.is_loading());
        assert!(state.last_error().unwrap().contains("502"));
    }
}
