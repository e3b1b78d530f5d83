//! Headless catalog fetcher
//!
//! Loads the source set from the environment, runs one full aggregation
//! pass, and prints the merged canonical items as JSON. Useful for probing
//! sources without the UI.

use cineview_catalog::{Aggregator, SourceGateway};
use cineview_core::config::{load_dotenv, CatalogConfig, ConfigLoader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    cineview_core::init_logging("cineview=info,warn")?;

    let config = CatalogConfig::from_env()?;
    config.validate()?;

    if config.sources.is_empty() {
        tracing::warn!("CINEVIEW_SOURCES is empty, the sample catalog will be served");
    }

    let aggregator = Aggregator::new(SourceGateway::new());
    let items = aggregator.fetch_all(&config.sources).await;

    tracing::info!(count = items.len(), "aggregation complete");
    println!("{}", serde_json::to_string_pretty(&items)?);

    Ok(())
}
