//! Catalog View: product list, add-to-cart and the cart badge.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use storefront_cart::{CartEvent, CartObserver, CartState, CartStore};
use storefront_catalog::{CatalogClient, Product};
use storefront_core::ProductId;
use storefront_events::Event;

use crate::effects::AddToCartEffect;

/// Loading state of the product grid.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogStatus {
    Loading,
    /// Fetch finished. A failed fetch also ends here, with no products.
    Ready(Vec<Product>),
}

impl CatalogStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogStatus::Loading)
    }

    pub fn is_ready(&self) -> bool {
        !self.is_loading()
    }

    pub fn products(&self) -> &[Product] {
        match self {
            CatalogStatus::Loading => &[],
            CatalogStatus::Ready(products) => products,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddToCartError {
    #[error("products are still loading")]
    StillLoading,
    #[error("no product with id {0} in the catalog")]
    UnknownProduct(ProductId),
}

/// Header badge: number of units in the cart.
#[derive(Debug, Default)]
pub struct CartBadge {
    count: AtomicU32,
}

impl CartBadge {
    /// `None` when the cart is empty (the badge is hidden).
    pub fn count(&self) -> Option<u32> {
        match self.count.load(Ordering::Relaxed) {
            0 => None,
            n => Some(n),
        }
    }
}

impl CartObserver for CartBadge {
    fn cart_changed(&self, event: &CartEvent, state: &CartState) {
        tracing::trace!(
            event = event.event_type(),
            product_id = %event.product_id(),
            "badge refresh"
        );
        self.count.store(state.item_count(), Ordering::Relaxed);
    }
}

/// The catalog route.
///
/// Mounting starts the fetch on a background task; the result comes back
/// through a watch channel. Dropping the view aborts the task, and a result
/// that still races in finds no receiver and is discarded.
pub struct CatalogView {
    status: watch::Receiver<CatalogStatus>,
    fetch: JoinHandle<()>,
    fetch_lost: bool,
    badge: Arc<CartBadge>,
    effect: Arc<dyn AddToCartEffect>,
}

impl CatalogView {
    /// Mount the view. Must be called from within a tokio runtime.
    pub fn mount(
        client: Arc<dyn CatalogClient>,
        fetch_delay: Duration,
        cart: &mut CartStore,
        effect: Arc<dyn AddToCartEffect>,
    ) -> Self {
        let (tx, status) = watch::channel(CatalogStatus::Loading);
        let fetch = tokio::spawn(load_catalog(client, fetch_delay, tx));

        let badge = Arc::new(CartBadge::default());
        badge.count.store(cart.item_count(), Ordering::Relaxed);
        cart.subscribe(&badge);

        Self {
            status,
            fetch,
            fetch_lost: false,
            badge,
            effect,
        }
    }

    pub fn status(&self) -> CatalogStatus {
        self.status.borrow().clone()
    }

    pub fn badge(&self) -> Option<u32> {
        self.badge.count()
    }

    /// Still waiting for a fetch result that can still arrive.
    pub fn is_pending(&self) -> bool {
        !self.fetch_lost && self.status.borrow().is_loading()
    }

    /// Wait until the fetch has resolved (either way).
    ///
    /// If the fetch task dies without reporting, the view stays `Loading`
    /// and this returns; `is_pending` is false from then on.
    pub async fn wait_until_loaded(&mut self) {
        if self.status.wait_for(CatalogStatus::is_ready).await.is_err() {
            tracing::warn!("catalog fetch ended without a result");
            self.fetch_lost = true;
        }
    }

    /// Add the product with `id` from the loaded list to the cart, then play
    /// the add-to-cart effect.
    pub fn add_to_cart(
        &self,
        cart: &mut CartStore,
        id: ProductId,
        out: &mut dyn Write,
    ) -> Result<u32, AddToCartError> {
        let status = self.status.borrow();
        let product = match &*status {
            CatalogStatus::Loading => return Err(AddToCartError::StillLoading),
            CatalogStatus::Ready(products) => products
                .iter()
                .find(|p| p.id == id)
                .ok_or(AddToCartError::UnknownProduct(id))?,
        };

        let quantity = cart.add(product).quantity;
        self.effect.play(product, out);

        Ok(quantity)
    }
}

impl Drop for CatalogView {
    fn drop(&mut self) {
        self.fetch.abort();
    }
}

impl core::fmt::Debug for CatalogView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogView")
            .field("status", &*self.status.borrow())
            .field("fetch_lost", &self.fetch_lost)
            .field("badge", &self.badge.count())
            .finish()
    }
}

async fn load_catalog(
    client: Arc<dyn CatalogClient>,
    fetch_delay: Duration,
    tx: watch::Sender<CatalogStatus>,
) {
    if !fetch_delay.is_zero() {
        tokio::time::sleep(fetch_delay).await;
    }

    let products = match client.fetch_products().await {
        Ok(products) => products,
        Err(err) => {
            tracing::error!("Error fetching catalog: {err}");
            Vec::new()
        }
    };

    if tx.send(CatalogStatus::Ready(products)).is_err() {
        tracing::debug!("catalog view torn down before fetch resolved; result dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{FlyToCart, NoEffect};
    use async_trait::async_trait;
    use storefront_catalog::CatalogError;
    use storefront_core::Price;
    use tokio::sync::Notify;

    struct StaticCatalog(Vec<Product>);

    #[async_trait]
    impl CatalogClient for StaticCatalog {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            Ok(self.0.clone())
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl CatalogClient for FailingCatalog {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::Network("connection refused".to_string()))
        }
    }

    /// Never answers until released.
    struct GatedCatalog {
        gate: Arc<Notify>,
        products: Vec<Product>,
    }

    #[async_trait]
    impl CatalogClient for GatedCatalog {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            self.gate.notified().await;
            Ok(self.products.clone())
        }
    }

    fn products() -> Vec<Product> {
        vec![
            Product::new(ProductId::new(1), "Backpack", Price::new(10.0)),
            Product::new(ProductId::new(2), "T-Shirt", Price::new(5.5)),
        ]
    }

    fn mount(client: impl CatalogClient + 'static, cart: &mut CartStore) -> CatalogView {
        CatalogView::mount(Arc::new(client), Duration::ZERO, cart, Arc::new(NoEffect))
    }

    #[tokio::test]
    async fn starts_loading_then_shows_products_in_order() {
        let mut cart = CartStore::new();
        let mut view = mount(StaticCatalog(products()), &mut cart);
        assert!(view.status().is_loading());

        view.wait_until_loaded().await;

        let status = view.status();
        let ids: Vec<u64> = status.products().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(!view.is_pending());
    }

    #[tokio::test]
    async fn failed_fetch_ends_ready_with_no_products() {
        let mut cart = CartStore::new();
        let mut view = mount(FailingCatalog, &mut cart);

        view.wait_until_loaded().await;

        assert_eq!(view.status(), CatalogStatus::Ready(Vec::new()));
        assert!(!view.is_pending());
    }

    #[tokio::test]
    async fn unresolved_fetch_stays_loading() {
        let mut cart = CartStore::new();
        let gate = Arc::new(Notify::new());
        let view = mount(
            GatedCatalog {
                gate: gate.clone(),
                products: products(),
            },
            &mut cart,
        );

        tokio::task::yield_now().await;
        assert!(view.is_pending());
        assert_eq!(
            view.add_to_cart(&mut cart, ProductId::new(1), &mut Vec::new()),
            Err(AddToCartError::StillLoading)
        );
        assert!(cart.state().is_empty());
    }

    #[tokio::test]
    async fn teardown_before_fetch_resolves_is_safe() {
        let mut cart = CartStore::new();
        let gate = Arc::new(Notify::new());
        let view = mount(
            GatedCatalog {
                gate: gate.clone(),
                products: products(),
            },
            &mut cart,
        );

        drop(view);
        gate.notify_one();
        tokio::task::yield_now().await;

        // The badge observer went away with the view.
        cart.add(&products()[0]);
        assert_eq!(cart.item_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_waits_for_initial_delay() {
        let mut cart = CartStore::new();
        let mut view = CatalogView::mount(
            Arc::new(StaticCatalog(products())),
            Duration::from_secs(1),
            &mut cart,
            Arc::new(NoEffect),
        );

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(view.status().is_loading());

        view.wait_until_loaded().await;
        assert_eq!(view.status().products().len(), 2);
    }

    #[tokio::test]
    async fn add_to_cart_updates_cart_badge_and_plays_effect() {
        let mut cart = CartStore::new();
        let mut view = CatalogView::mount(
            Arc::new(StaticCatalog(products())),
            Duration::ZERO,
            &mut cart,
            Arc::new(FlyToCart),
        );
        view.wait_until_loaded().await;
        assert_eq!(view.badge(), None);

        let mut out = Vec::new();
        assert_eq!(view.add_to_cart(&mut cart, ProductId::new(1), &mut out), Ok(1));
        assert_eq!(view.add_to_cart(&mut cart, ProductId::new(1), &mut out), Ok(2));
        assert_eq!(view.add_to_cart(&mut cart, ProductId::new(2), &mut out), Ok(1));

        assert_eq!(view.badge(), Some(3));
        assert_eq!(cart.total(), Price::new(25.5));

        let flourish = String::from_utf8(out).unwrap();
        assert_eq!(flourish.matches("~~~> [cart]").count(), 3);
    }

    #[tokio::test]
    async fn unknown_product_is_a_view_error_not_a_cart_change() {
        let mut cart = CartStore::new();
        let mut view = mount(StaticCatalog(products()), &mut cart);
        view.wait_until_loaded().await;

        let err = view
            .add_to_cart(&mut cart, ProductId::new(42), &mut Vec::new())
            .unwrap_err();
        assert_eq!(err, AddToCartError::UnknownProduct(ProductId::new(42)));
        assert!(cart.state().is_empty());
    }

    #[tokio::test]
    async fn badge_starts_from_existing_cart() {
        let mut cart = CartStore::new();
        cart.add(&products()[1]);
        cart.add(&products()[1]);

        let view = mount(StaticCatalog(products()), &mut cart);
        assert_eq!(view.badge(), Some(2));

        cart.remove(ProductId::new(2));
        assert_eq!(view.badge(), None);
    }
}
