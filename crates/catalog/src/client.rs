//! Catalog client: one read request against the remote catalog endpoint.

use async_trait::async_trait;

use crate::product::Product;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Source of product records.
///
/// A single batch, no pagination, no retry. Callers decide what a failure
/// means for them.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// HTTP implementation: a plain `GET` returning a JSON array of products.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpCatalogClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

}

impl Default for HttpCatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        tracing::debug!(endpoint = %self.endpoint, "fetching catalog");

        let resp = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Api(
                status.as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        let products: Vec<Product> = resp
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        tracing::info!(endpoint = %self.endpoint, count = products.len(), "catalog fetched");
        Ok(products)
    }
}
