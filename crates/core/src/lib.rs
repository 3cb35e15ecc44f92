//! `storefront-core`: domain building blocks shared by the storefront crates.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP, no UI).

pub mod error;
pub mod id;
pub mod money;

pub use error::DomainError;
pub use id::ProductId;
pub use money::Price;
