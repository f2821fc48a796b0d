mod api_types;
mod error;
mod fetch;
mod models;
mod orchestrator;
mod render;
mod state;
mod view;
mod viz_export;

use anyhow::Result;
use clap::Parser;
use orchestrator::run_dashboard;
use reqwest::Client;
use tracing::info;

/// Quake Watch - live earthquake dashboard over the USGS all-day feed
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output directory for the D3-ready overlay bundle (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: String,

    /// Run a single refresh cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting quake-watch");

    let args = Args::parse();
    let client = Client::builder().build()?;

    run_dashboard(&client, &args.output_dir, args.once).await
}
