//! `storefront-app`
//!
//! **Responsibility:** the storefront's front end.
//!
//! This crate provides:
//! - Two routes (`/` catalog, `/cart` cart)
//! - The Catalog View (fetch + add-to-cart) and the Cart View (list + remove)
//! - Plain-text rendering of both views
//! - A line-oriented shell acting as the UI event loop
//!
//! The cart itself lives in `storefront-cart`; views only receive it by
//! reference.

pub mod config;
pub mod effects;
pub mod render;
pub mod routes;
pub mod shell;
pub mod views;

pub use config::{AppConfig, ConfigError};
pub use effects::{AddToCartEffect, FlyToCart, NoEffect};
pub use routes::Route;
pub use shell::{Command, CommandError, Flow, Shell};
pub use views::{CartPage, CartView, CatalogStatus, CatalogView};
