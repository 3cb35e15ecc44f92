use chrono::{DateTime, Utc};

use storefront_core::ProductId;
use storefront_events::Event;

use crate::store::CartState;

/// Event: a unit of a product was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAdded {
    pub product_id: ProductId,
    /// Quantity of the line after the add.
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a product's line was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRemoved {
    pub product_id: ProductId,
    /// `false` when no line with that id existed (the remove was a no-op).
    pub existed: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
}

impl CartEvent {
    pub fn product_id(&self) -> ProductId {
        match self {
            CartEvent::ItemAdded(e) => e.product_id,
            CartEvent::ItemRemoved(e) => e.product_id,
        }
    }
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item.added",
            CartEvent::ItemRemoved(_) => "cart.item.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
        }
    }
}

/// Read subscription to the cart.
///
/// Called synchronously, after the state has been updated and before the
/// mutating call returns. Observers cannot mutate the cart from here.
pub trait CartObserver {
    fn cart_changed(&self, event: &CartEvent, state: &CartState);
}
