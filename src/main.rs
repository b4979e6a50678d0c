use anyhow::Result;
use homepage_data::config::Config;
use homepage_data::{Aggregator, HomeDocument};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("homepage_data=info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    let config = Config::load(&config_path)?;

    let document = HomeDocument::load(&config.output.home_document)?;
    let aggregator = Aggregator::from_config(&config)?;

    aggregator
        .build_and_publish(&document, &config.output.payload)
        .await?;
    Ok(())
}
