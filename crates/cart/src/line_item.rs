use storefront_catalog::Product;
use storefront_core::{Price, ProductId};

/// All units of a single product in the cart.
///
/// Title, price and image are captured when the product is first added and
/// are not refreshed by later adds of the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartLineItem {
    /// Start a line for `product` with a quantity of one.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Price × quantity, unrounded.
    pub fn subtotal(&self) -> Price {
        self.price * self.quantity
    }
}
