//! Storefront entry point.

use std::sync::Arc;

use anyhow::Context;

use storefront_app::{AppConfig, FlyToCart, Shell};
use storefront_catalog::HttpCatalogClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    storefront_observability::init(config.log_format);

    tracing::info!(
        catalog_url = %config.catalog_url,
        fetch_delay_ms = config.fetch_delay.as_millis() as u64,
        "starting storefront"
    );

    let client = Arc::new(HttpCatalogClient::new(config.catalog_url.clone()));
    let mut shell = Shell::new(client, config.fetch_delay, Arc::new(FlyToCart));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    shell.run(stdin, &mut stdout).await?;

    tracing::info!(items = shell.cart().item_count(), "session ended");
    Ok(())
}
