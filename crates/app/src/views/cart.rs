//! Cart View: what is in the cart, with a total.

use std::sync::{Arc, Mutex, PoisonError};

use storefront_cart::{CartEvent, CartObserver, CartState, CartStore};
use storefront_core::{Price, ProductId};

/// One rendered line of the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartCard {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price: Price,
    pub quantity: u32,
    pub subtotal: Price,
}

/// What the cart route shows.
#[derive(Debug, Clone, PartialEq)]
pub enum CartPage {
    Empty,
    Items { cards: Vec<CartCard>, total: Price },
}

/// Local copy of the cart, refreshed by the store on every change.
#[derive(Debug, Default)]
struct CartSnapshot {
    state: Mutex<CartState>,
}

impl CartObserver for CartSnapshot {
    fn cart_changed(&self, _event: &CartEvent, state: &CartState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state.clone();
    }
}

/// The cart route.
#[derive(Debug)]
pub struct CartView {
    snapshot: Arc<CartSnapshot>,
}

impl CartView {
    pub fn mount(cart: &mut CartStore) -> Self {
        let snapshot = Arc::new(CartSnapshot {
            state: Mutex::new(cart.state().clone()),
        });
        cart.subscribe(&snapshot);
        Self { snapshot }
    }

    pub fn page(&self) -> CartPage {
        let state = self
            .snapshot
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if state.is_empty() {
            return CartPage::Empty;
        }

        let cards = state
            .lines()
            .iter()
            .map(|line| CartCard {
                id: line.id,
                title: line.title.clone(),
                image: line.image.clone(),
                price: line.price,
                quantity: line.quantity,
                subtotal: line.subtotal(),
            })
            .collect();

        CartPage::Items {
            cards,
            total: state.total(),
        }
    }

    /// Remove a whole line. Returns whether a line was there.
    pub fn remove(&self, cart: &mut CartStore, id: ProductId) -> bool {
        cart.remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::Product;

    fn product(id: u64, price: f64) -> Product {
        Product::new(ProductId::new(id), format!("Item {id}"), Price::new(price))
    }

    #[test]
    fn empty_cart_renders_empty_page() {
        let mut cart = CartStore::new();
        let view = CartView::mount(&mut cart);
        assert_eq!(view.page(), CartPage::Empty);
    }

    #[test]
    fn page_follows_cart_changes() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 10.0));

        let view = CartView::mount(&mut cart);
        cart.add(&product(1, 10.0));
        cart.add(&product(2, 5.5));

        match view.page() {
            CartPage::Items { cards, total } => {
                assert_eq!(cards.len(), 2);
                assert_eq!(cards[0].quantity, 2);
                assert_eq!(cards[0].subtotal, Price::new(20.0));
                assert_eq!(cards[1].title, "Item 2");
                assert_eq!(total.to_string(), "25.50");
            }
            CartPage::Empty => panic!("expected items"),
        }
    }

    #[test]
    fn remove_dispatches_to_store() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 10.0));
        cart.add(&product(2, 5.5));
        let view = CartView::mount(&mut cart);

        assert!(view.remove(&mut cart, ProductId::new(1)));
        assert!(!view.remove(&mut cart, ProductId::new(99)));

        match view.page() {
            CartPage::Items { cards, total } => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].id, ProductId::new(2));
                assert_eq!(total.to_string(), "5.50");
            }
            CartPage::Empty => panic!("expected items"),
        }

        view.remove(&mut cart, ProductId::new(2));
        assert_eq!(view.page(), CartPage::Empty);
    }
}
