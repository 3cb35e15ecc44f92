//! Product catalog: the records the storefront sells and the client that
//! fetches them from the remote catalog service.

pub mod client;
pub mod product;

pub use client::{CatalogClient, CatalogError, HttpCatalogClient, DEFAULT_CATALOG_URL};
pub use product::{Product, Rating};
