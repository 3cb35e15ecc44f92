//! Decorative transitions.
//!
//! Effects run after a successful add and never touch the cart. Output errors
//! are swallowed: a failed flourish must not fail the add.

use std::io::Write;

use storefront_catalog::Product;

/// Fire-and-forget visual effect played when a product lands in the cart.
pub trait AddToCartEffect: Send + Sync {
    fn play(&self, product: &Product, out: &mut dyn Write);
}

/// Terminal rendition of the "fly to cart" animation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlyToCart;

impl AddToCartEffect for FlyToCart {
    fn play(&self, product: &Product, out: &mut dyn Write) {
        let _ = writeln!(out, "  ({}) ~~~> [cart]", product.id);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffect;

impl AddToCartEffect for NoEffect {
    fn play(&self, _product: &Product, _out: &mut dyn Write) {}
}
