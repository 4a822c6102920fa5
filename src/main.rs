//! newsmap — Binary Entrypoint
//! Runs one refresh cycle against the configured feed, logging what a real
//! map surface would render. The visual layer itself lives elsewhere; this
//! binary exists for running the pipeline against a live feed.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsmap::{refresh, NewsmapConfig, TracingSurface};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("newsmap=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = NewsmapConfig::load()?;
    tracing::info!(
        feed_base_url = %config.feed_base_url,
        days = config.days,
        "starting refresh cycle"
    );

    let mut surface = TracingSurface;
    let cycle = refresh::run_http_refresh(&config, &mut surface).await;

    tracing::info!(
        marker_groups = cycle.aggregated().marker_groups().len(),
        items = cycle.aggregated().item_count(),
        "done"
    );
    Ok(())
}
