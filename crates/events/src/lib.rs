//! Events and synchronous observer mechanics.
//!
//! Domain crates define their own event types and observer traits; this crate
//! only provides the shared `Event` contract and the registry that fans
//! notifications out to observers.

pub mod event;
pub mod observers;

pub use event::Event;
pub use observers::ObserverSet;
