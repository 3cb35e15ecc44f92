//! View models for the two routes.

pub mod cart;
pub mod catalog;

pub use cart::{CartCard, CartPage, CartView};
pub use catalog::{AddToCartError, CartBadge, CatalogStatus, CatalogView};
