//! Cart domain module.
//!
//! The cart is the single source of truth for what the shopper has selected:
//! an ordered list of line items, unique by product id, mutated only through
//! [`CartStore::add`] and [`CartStore::remove`]. Deterministic domain logic
//! only (no IO, no HTTP, no rendering).

pub mod events;
pub mod line_item;
pub mod store;

pub use events::{CartEvent, CartObserver, ItemAdded, ItemRemoved};
pub use line_item::CartLineItem;
pub use store::{CartState, CartStore};
