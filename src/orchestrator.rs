use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use reqwest::Client;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::fetch::fetch_events;
use crate::render::render_dashboard_text;
use crate::state::DashboardState;
use crate::view::summarize;
use crate::viz_export::write_all_viz;

/// Fixed refresh period. Endpoint and cadence are constants, not
/// configuration.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Run the dashboard: one immediate refresh, then a fixed-interval timer
/// until shutdown. The timer dies with the loop, so no fetch outlives
/// teardown.
pub async fn run_dashboard(client: &Client, output_dir: &str, once: bool) -> Result<()> {
    let mut state = DashboardState::new();

    refresh(client, &mut state, output_dir).await?;
    if once {
        return Ok(());
    }

    let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await; // first tick completes immediately; already refreshed

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                refresh(client, &mut state, output_dir).await?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested - stopping refresh timer");
                break;
            }
        }
    }
    Ok(())
}

/// One refresh cycle: guarded fetch, state update, render, export. A feed
/// failure is recorded in the state and rendered as a notice, never
/// propagated; only filesystem trouble from the export aborts the loop.
async fn refresh(client: &Client, state: &mut DashboardState, output_dir: &str) -> Result<()> {
    if !state.begin_refresh() {
        return Ok(());
    }

    match fetch_events(client).await {
        Ok(events) => {
            state.complete_refresh(events, Utc::now());
        }
        Err(err) => {
            warn!("Feed refresh failed - error={}", err);
            state.fail_refresh(&err);
        }
    }

    let summary = summarize(state.events());
    let now = Utc::now();
    println!("{}", render_dashboard_text(state, &summary, now));

    write_all_viz(Path::new(output_dir), state.events(), &summary, now)?;
    debug!("Wrote viz bundle - dir={}", output_dir);
    Ok(())
}
