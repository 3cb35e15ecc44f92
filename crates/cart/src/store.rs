//! Cart state and the store that owns it.

use std::sync::{Arc, Weak};

use chrono::Utc;

use storefront_catalog::Product;
use storefront_core::{Price, ProductId};
use storefront_events::{Event, ObserverSet};

use crate::events::{CartEvent, CartObserver, ItemAdded, ItemRemoved};
use crate::line_item::CartLineItem;

/// Ordered cart contents, at most one line per product id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    lines: Vec<CartLineItem>,
}

impl CartState {
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ price × quantity at full precision.
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLineItem::subtotal).sum()
    }

    /// Σ quantity, i.e. the number of units in the cart.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }
}

/// Single source of truth for the cart.
///
/// Owned by the application and handed to views explicitly. Every mutation
/// notifies observers synchronously, in the order mutations are issued.
#[derive(Debug, Default)]
pub struct CartStore {
    state: CartState,
    observers: ObserverSet<dyn CartObserver>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn total(&self) -> Price {
        self.state.total()
    }

    pub fn item_count(&self) -> u32 {
        self.state.item_count()
    }

    /// Register a read subscription. The store holds it weakly; dropping the
    /// last `Arc` unsubscribes.
    pub fn subscribe<O: CartObserver + 'static>(&mut self, observer: &Arc<O>) {
        let weak = Arc::downgrade(observer);
        let weak: Weak<dyn CartObserver> = weak;
        self.observers.register(weak);
    }

    /// Add one unit of `product`.
    ///
    /// An existing line only has its quantity bumped; its title, price and
    /// image stay as first recorded. Never fails.
    pub fn add(&mut self, product: &Product) -> &CartLineItem {
        let index = match self.state.position(product.id) {
            Some(index) => {
                let line = &mut self.state.lines[index];
                line.quantity = line.quantity.saturating_add(1);
                index
            }
            None => {
                self.state.lines.push(CartLineItem::from_product(product));
                self.state.lines.len() - 1
            }
        };

        let quantity = self.state.lines[index].quantity;
        tracing::debug!(product_id = %product.id, quantity, "cart item added");

        self.publish(CartEvent::ItemAdded(ItemAdded {
            product_id: product.id,
            quantity,
            occurred_at: Utc::now(),
        }));

        &self.state.lines[index]
    }

    /// Remove the whole line for `id`. Unknown ids are a no-op, not an error.
    pub fn remove(&mut self, id: ProductId) -> Option<CartLineItem> {
        let removed = self
            .state
            .position(id)
            .map(|index| self.state.lines.remove(index));

        tracing::debug!(product_id = %id, existed = removed.is_some(), "cart item removed");

        self.publish(CartEvent::ItemRemoved(ItemRemoved {
            product_id: id,
            existed: removed.is_some(),
            occurred_at: Utc::now(),
        }));

        removed
    }

    fn publish(&mut self, event: CartEvent) {
        tracing::trace!(
            event_type = event.event_type(),
            version = event.version(),
            occurred_at = %event.occurred_at(),
            product_id = %event.product_id(),
            "cart event published"
        );

        let state = &self.state;
        self.observers
            .notify(|observer| observer.cart_changed(&event, state));
    }
}
