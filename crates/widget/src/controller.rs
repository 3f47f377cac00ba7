//! Cart state and interaction handling.
//!
//! [`CartController`] owns the cart items and the pending-removal slot. Every
//! mutation ends with the same epilogue, in order:
//!
//! 1. persist the full cart
//! 2. re-render the item container
//! 3. recompute the totals
//!
//! Totals and markup are prepared before anything is saved, so a change whose
//! amounts are out of range leaves both memory and storage untouched.
//!
//! Callers get read-only access to the items; all changes go through the
//! operations below so the epilogue cannot be skipped.

use cart_widget_core::{
    AmountOverflow, CartItem, ItemId, Quantity, QuantityInput, Totals, compute_totals,
};
use thiserror::Error;
use tracing::instrument;

use crate::remote::CartSource;
use crate::render::{Binding, RenderError, RenderedCart, render};
use crate::storage::{CartStorage, KeyValueStore, StorageError};
use crate::surface::{CartSurface, LoadingGuard, Notification};

/// Errors raised by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Loading or saving the cart failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Rendering the item container failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The cart's totals are out of range.
    #[error("Amount error: {0}")]
    Amount(#[from] AmountOverflow),
}

/// A user interaction with the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Checkout button clicked.
    Checkout,
    /// A row's quantity input changed to `raw`.
    QuantityChanged { id: ItemId, raw: String },
    /// A row's remove button clicked.
    RemoveClicked { id: ItemId },
    /// Confirm button in the removal modal clicked.
    ConfirmRemoval,
    /// Cancel button in the removal modal clicked.
    CancelRemoval,
}

/// Where the initial cart came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Restored from local storage.
    Stored { count: usize },
    /// Fetched from the remote endpoint.
    Remote { count: usize },
    /// The remote fetch failed; the cart is still empty.
    Failed,
}

/// Outcome of a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The order was placed and the cart cleared.
    Placed { count: usize },
    /// Nothing to check out.
    Empty,
}

/// Single-slot holding area for a removal awaiting confirmation.
#[derive(Debug, Clone, Copy, Default)]
struct RemovalSlot {
    target: Option<ItemId>,
    open: bool,
}

/// Owns cart state and applies every mutation.
#[derive(Debug)]
pub struct CartController<S, V> {
    items: Vec<CartItem>,
    totals: Totals,
    removal: RemovalSlot,
    storage: CartStorage<S>,
    surface: V,
}

impl<S: KeyValueStore, V: CartSurface> CartController<S, V> {
    /// Create a controller with an empty cart.
    ///
    /// Nothing is read or drawn until [`initialize`](Self::initialize).
    pub fn new(storage: CartStorage<S>, surface: V) -> Self {
        Self {
            items: Vec::new(),
            totals: Totals::default(),
            removal: RemovalSlot::default(),
            storage,
            surface,
        }
    }

    /// Current items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Totals for the current items.
    #[must_use]
    pub const fn totals(&self) -> Totals {
        self.totals
    }

    /// Identifier held in the pending-removal slot, if any.
    ///
    /// The slot keeps its value after a cancel until the next request.
    #[must_use]
    pub const fn pending_removal(&self) -> Option<ItemId> {
        self.removal.target
    }

    /// The surface this controller draws onto.
    #[must_use]
    pub const fn surface(&self) -> &V {
        &self.surface
    }

    /// Mutable access to the surface, for taking response snapshots.
    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    /// The persistence adapter.
    #[must_use]
    pub const fn storage(&self) -> &CartStorage<S> {
        &self.storage
    }

    /// Seed the cart from storage, or from `source` when storage is empty.
    ///
    /// A stored cart is drawn without being written back.
    ///
    /// # Errors
    ///
    /// A corrupt stored cart is returned as [`CartError::Storage`], and one
    /// whose totals are out of range as [`CartError::Amount`]. Both are meant
    /// to abort startup. A failed remote fetch is not an error; see
    /// [`hydrate_from`](Self::hydrate_from).
    #[instrument(skip_all)]
    pub async fn initialize<C: CartSource>(&mut self, source: &C) -> Result<Hydration, CartError> {
        let stored = self.storage.load()?;
        if stored.is_empty() {
            return self.hydrate_from(source).await;
        }

        let count = stored.len();
        let totals = compute_totals(&stored)?;
        let rendered = render(&stored)?;
        self.items = stored;
        self.show(rendered, totals);
        tracing::info!(count, "Restored cart from storage");
        Ok(Hydration::Stored { count })
    }

    /// Replace the cart with items fetched from `source`.
    ///
    /// The loading indicator is visible for the duration of the fetch. On
    /// failure, or when the fetched totals are out of range, the error is
    /// logged, the user is notified, and the cart is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting or rendering the fetched cart fails.
    #[instrument(skip_all)]
    pub async fn hydrate_from<C: CartSource>(
        &mut self,
        source: &C,
    ) -> Result<Hydration, CartError> {
        let fetched = {
            let _loading = LoadingGuard::acquire(&mut self.surface);
            source.fetch_initial_cart().await
        };

        match fetched {
            Ok(items) => {
                let count = items.len();
                match self.commit(items) {
                    Ok(()) => Ok(Hydration::Remote { count }),
                    Err(CartError::Amount(e)) => {
                        tracing::error!(error = %e, "Fetched cart totals out of range");
                        self.surface.notify(Notification::LOAD_FAILED);
                        Ok(Hydration::Failed)
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch cart data");
                self.surface.notify(Notification::LOAD_FAILED);
                Ok(Hydration::Failed)
            }
        }
    }

    /// Dispatch a user interaction.
    ///
    /// Row events are ignored unless their control belongs to the latest
    /// render.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting or rendering fails.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: UiEvent) -> Result<(), CartError> {
        match event {
            UiEvent::Checkout => self.checkout().map(|_| ()),
            UiEvent::QuantityChanged { id, raw } => {
                if !self.surface.is_bound(&Binding::QuantityChange(id)) {
                    tracing::debug!(%id, "Ignoring change on unbound quantity control");
                    return Ok(());
                }
                self.change_quantity(id, &raw)
            }
            UiEvent::RemoveClicked { id } => {
                if !self.surface.is_bound(&Binding::RemovalRequest(id)) {
                    tracing::debug!(%id, "Ignoring click on unbound remove control");
                    return Ok(());
                }
                self.request_removal(id);
                Ok(())
            }
            UiEvent::ConfirmRemoval => self.confirm_removal(),
            UiEvent::CancelRemoval => {
                self.cancel_removal();
                Ok(())
            }
        }
    }

    /// Place the order, or tell the user the cart is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting or rendering fails.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<CheckoutOutcome, CartError> {
        if self.items.is_empty() {
            self.surface.notify(Notification::CART_EMPTY);
            return Ok(CheckoutOutcome::Empty);
        }

        let count = self.items.len();
        self.surface.notify(Notification::ORDER_PLACED);
        self.commit(Vec::new())?;
        tracing::info!(count, "Order placed");
        Ok(CheckoutOutcome::Placed { count })
    }

    /// Apply the raw text of a quantity control.
    ///
    /// Zero, negative, or non-numeric input warns the user and applies 1.
    /// A quantity that would push the totals out of range warns the user and
    /// keeps the previous quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting or rendering fails.
    #[instrument(skip(self))]
    pub fn change_quantity(&mut self, id: ItemId, raw: &str) -> Result<(), CartError> {
        let input = QuantityInput::parse(raw);
        if input.was_corrected() {
            self.surface.notify(Notification::QUANTITY_TOO_LOW);
        }
        match self.update_item_quantity(id, input.quantity()) {
            Err(CartError::Amount(e)) => {
                tracing::warn!(error = %e, %id, "Rejected quantity change");
                self.surface.notify(Notification::QUANTITY_TOO_HIGH);
                Ok(())
            }
            other => other,
        }
    }

    /// Set the quantity of every item with identifier `id`.
    ///
    /// Persists and redraws even when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Amount`] without changing anything if the new
    /// totals are out of range, or an error if persisting or rendering fails.
    #[instrument(skip(self))]
    pub fn update_item_quantity(
        &mut self,
        id: ItemId,
        quantity: Quantity,
    ) -> Result<(), CartError> {
        let mut items = self.items.clone();
        let mut matched = 0_usize;
        for item in items.iter_mut().filter(|item| item.id == id) {
            item.quantity = quantity;
            matched += 1;
        }
        tracing::debug!(matched, "Updated quantity");
        self.commit(items)
    }

    /// Remove every item with identifier `id`, keeping the rest in order.
    ///
    /// Returns how many items were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting or rendering fails.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: ItemId) -> Result<usize, CartError> {
        let items: Vec<CartItem> = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        let removed = self.items.len() - items.len();
        tracing::debug!(removed, "Removed items");
        self.commit(items)?;
        Ok(removed)
    }

    /// Hold `id` for removal and show the confirmation modal.
    ///
    /// Replaces any earlier pending target.
    pub fn request_removal(&mut self, id: ItemId) {
        self.removal = RemovalSlot {
            target: Some(id),
            open: true,
        };
        self.surface.set_modal_visible(true);
    }

    /// Remove the pending target and hide the modal.
    ///
    /// Does nothing while the modal is hidden.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting or rendering fails.
    pub fn confirm_removal(&mut self) -> Result<(), CartError> {
        if !self.removal.open {
            tracing::debug!("Ignoring confirm with no open removal modal");
            return Ok(());
        }
        self.close_modal();
        if let Some(id) = self.removal.target {
            self.remove_item(id)?;
        }
        Ok(())
    }

    /// Hide the modal without changing the cart.
    pub fn cancel_removal(&mut self) {
        self.close_modal();
    }

    fn close_modal(&mut self) {
        self.removal.open = false;
        self.surface.set_modal_visible(false);
    }

    /// Make `items` current: persist, then redraw.
    ///
    /// Nothing is saved or drawn if the totals are out of range or the
    /// markup fails to render.
    fn commit(&mut self, items: Vec<CartItem>) -> Result<(), CartError> {
        let totals = compute_totals(&items)?;
        let rendered = render(&items)?;
        self.storage.save(&items)?;
        self.items = items;
        self.show(rendered, totals);
        Ok(())
    }

    /// Replace the item container, then the totals.
    fn show(&mut self, rendered: RenderedCart, totals: Totals) {
        self.surface.replace_items(rendered);
        self.surface.set_totals(&totals);
        self.totals = totals;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cart_widget_core::Price;
    use rust_decimal::Decimal;

    use super::*;
    use crate::remote::FetchError;
    use crate::storage::MemoryStore;
    use crate::surface::PageSurface;

    struct StaticSource {
        items: Vec<CartItem>,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn new(items: Vec<CartItem>) -> Self {
            Self {
                items,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl CartSource for StaticSource {
        async fn fetch_initial_cart(&self) -> Result<Vec<CartItem>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.items.clone())
        }
    }

    struct FailingSource;

    impl CartSource for FailingSource {
        async fn fetch_initial_cart(&self) -> Result<Vec<CartItem>, FetchError> {
            Err(FetchError::Status { status: 503 })
        }
    }

    fn item(id: i64, price: i64, quantity: u32) -> CartItem {
        CartItem {
            id: ItemId::new(id),
            title: format!("Item {id}"),
            price: Price::new(Decimal::from(price)),
            quantity: Quantity::new(quantity).unwrap(),
            image: format!("images/{id}.png"),
        }
    }

    fn scenario_cart() -> Vec<CartItem> {
        vec![item(1, 10, 2), item(2, 5, 1)]
    }

    type TestController = CartController<MemoryStore, PageSurface>;

    async fn controller_with(items: Vec<CartItem>) -> (TestController, MemoryStore) {
        let store = MemoryStore::new();
        let mut controller =
            CartController::new(CartStorage::new(store.clone(), "cart"), PageSurface::new());
        controller
            .initialize(&StaticSource::new(items))
            .await
            .unwrap();
        (controller, store)
    }

    fn stored(store: &MemoryStore) -> Vec<CartItem> {
        CartStorage::new(store.clone(), "cart").load().unwrap()
    }

    #[tokio::test]
    async fn test_initialize_prefers_stored_cart() {
        let store = MemoryStore::new();
        CartStorage::new(store.clone(), "cart")
            .save(&[item(9, 1, 1)])
            .unwrap();
        let source = StaticSource::new(scenario_cart());

        let mut controller =
            CartController::new(CartStorage::new(store, "cart"), PageSurface::new());
        let hydration = controller.initialize(&source).await.unwrap();

        assert_eq!(hydration, Hydration::Stored { count: 1 });
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.items()[0].id, ItemId::new(9));
        assert_eq!(controller.surface().subtotal(), "Rs. 1.00");
    }

    #[tokio::test]
    async fn test_initialize_fetches_when_storage_empty() {
        let (controller, store) = controller_with(scenario_cart()).await;

        assert_eq!(controller.items(), scenario_cart().as_slice());
        assert_eq!(stored(&store), scenario_cart());
        assert_eq!(controller.surface().subtotal(), "Rs. 25.00");
        assert_eq!(controller.surface().total(), "Rs. 25.00");
        assert!(!controller.surface().is_loading());
    }

    #[tokio::test]
    async fn test_initialize_fetch_failure_leaves_cart_empty() {
        let store = MemoryStore::new();
        let mut controller =
            CartController::new(CartStorage::new(store.clone(), "cart"), PageSurface::new());

        let hydration = controller.initialize(&FailingSource).await.unwrap();

        assert_eq!(hydration, Hydration::Failed);
        assert!(controller.items().is_empty());
        assert!(!controller.surface().is_loading());
        assert_eq!(
            controller.surface().pending_notifications(),
            [Notification::LOAD_FAILED]
        );
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[tokio::test]
    async fn test_initialize_corrupt_storage_is_fatal() {
        let store = MemoryStore::new();
        store.set("cart", "{not json").unwrap();
        let mut controller =
            CartController::new(CartStorage::new(store, "cart"), PageSurface::new());

        let err = controller.initialize(&FailingSource).await.unwrap_err();
        assert!(matches!(err, CartError::Storage(StorageError::CorruptCart { .. })));
    }

    #[tokio::test]
    async fn test_scenario_zero_quantity_via_control() {
        let (mut controller, store) = controller_with(scenario_cart()).await;
        assert_eq!(controller.surface().subtotal(), "Rs. 25.00");

        controller
            .handle(UiEvent::QuantityChanged {
                id: ItemId::new(1),
                raw: "0".to_string(),
            })
            .unwrap();

        assert_eq!(controller.items()[0].quantity, Quantity::ONE);
        assert_eq!(stored(&store)[0].quantity, Quantity::ONE);
        assert_eq!(controller.surface().subtotal(), "Rs. 15.00");
        assert!(controller.surface().items_html().contains("value=\"1\""));
        assert_eq!(
            controller.surface().pending_notifications(),
            [Notification::QUANTITY_TOO_LOW]
        );
    }

    #[tokio::test]
    async fn test_update_quantity_touches_only_matching_items() {
        let (mut controller, store) =
            controller_with(vec![item(1, 10, 1), item(2, 5, 1), item(1, 10, 4)]).await;

        controller
            .update_item_quantity(ItemId::new(1), Quantity::new(3).unwrap())
            .unwrap();

        let quantities: Vec<u32> = controller.items().iter().map(|i| i.quantity.get()).collect();
        assert_eq!(quantities, [3, 1, 3]);
        assert_eq!(stored(&store), controller.items());
    }

    #[tokio::test]
    async fn test_update_quantity_unknown_id_still_persists() {
        let (mut controller, store) = controller_with(scenario_cart()).await;
        store.set("cart", "[]").unwrap();

        controller
            .update_item_quantity(ItemId::new(99), Quantity::new(5).unwrap())
            .unwrap();

        assert_eq!(controller.items(), scenario_cart().as_slice());
        assert_eq!(stored(&store), scenario_cart());
    }

    #[tokio::test]
    async fn test_subtotal_survives_reload() {
        let (mut controller, store) = controller_with(scenario_cart()).await;
        controller.change_quantity(ItemId::new(2), "7").unwrap();
        controller.change_quantity(ItemId::new(1), "3").unwrap();
        let before = controller.totals();

        let mut reloaded = CartController::new(CartStorage::new(store, "cart"), PageSurface::new());
        reloaded.initialize(&FailingSource).await.unwrap();

        assert_eq!(reloaded.totals(), before);
        assert_eq!(reloaded.surface().subtotal(), "Rs. 65.00");
    }

    #[tokio::test]
    async fn test_remove_item_removes_all_matches_in_order() {
        let (mut controller, store) = controller_with(vec![
            item(1, 10, 1),
            item(2, 5, 2),
            item(1, 10, 3),
            item(3, 7, 1),
        ])
        .await;

        let removed = controller.remove_item(ItemId::new(1)).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(controller.items(), [item(2, 5, 2), item(3, 7, 1)].as_slice());
        assert_eq!(stored(&store), controller.items());
    }

    #[tokio::test]
    async fn test_checkout_clears_cart() {
        let (mut controller, store) = controller_with(scenario_cart()).await;

        let outcome = controller.checkout().unwrap();

        assert_eq!(outcome, CheckoutOutcome::Placed { count: 2 });
        assert!(controller.items().is_empty());
        assert!(stored(&store).is_empty());
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        assert!(controller.surface().items_html().contains("Your cart is empty."));
        assert_eq!(controller.surface().subtotal(), "Rs. 0.00");
        assert_eq!(
            controller.surface().pending_notifications(),
            [Notification::ORDER_PLACED]
        );
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_is_noop() {
        let (mut controller, store) = controller_with(Vec::new()).await;
        let snapshot = store.get("cart").unwrap();

        let outcome = controller.handle(UiEvent::Checkout);

        assert!(outcome.is_ok());
        assert!(controller.items().is_empty());
        assert_eq!(store.get("cart").unwrap(), snapshot);
        assert_eq!(
            controller.surface().pending_notifications(),
            [Notification::CART_EMPTY]
        );
    }

    #[tokio::test]
    async fn test_request_then_cancel_keeps_item() {
        let (mut controller, _store) = controller_with(scenario_cart()).await;

        controller
            .handle(UiEvent::RemoveClicked { id: ItemId::new(1) })
            .unwrap();
        assert!(controller.surface().is_modal_open());
        assert_eq!(controller.pending_removal(), Some(ItemId::new(1)));

        controller.handle(UiEvent::CancelRemoval).unwrap();

        assert!(!controller.surface().is_modal_open());
        assert_eq!(controller.items(), scenario_cart().as_slice());
        // Stale but inert.
        assert_eq!(controller.pending_removal(), Some(ItemId::new(1)));
        controller.handle(UiEvent::ConfirmRemoval).unwrap();
        assert_eq!(controller.items().len(), 2);
    }

    #[tokio::test]
    async fn test_request_then_confirm_removes_exactly_target() {
        let (mut controller, store) = controller_with(scenario_cart()).await;

        controller
            .handle(UiEvent::RemoveClicked { id: ItemId::new(1) })
            .unwrap();
        controller.handle(UiEvent::ConfirmRemoval).unwrap();

        assert!(!controller.surface().is_modal_open());
        assert_eq!(controller.items(), [item(2, 5, 1)].as_slice());
        assert_eq!(stored(&store), [item(2, 5, 1)]);
        assert_eq!(controller.surface().subtotal(), "Rs. 5.00");
    }

    #[tokio::test]
    async fn test_second_request_replaces_pending_target() {
        let (mut controller, _store) = controller_with(scenario_cart()).await;

        controller.request_removal(ItemId::new(1));
        controller.request_removal(ItemId::new(2));
        controller.confirm_removal().unwrap();

        assert_eq!(controller.items(), [item(1, 10, 2)].as_slice());
    }

    #[tokio::test]
    async fn test_events_for_unbound_controls_are_ignored() {
        let (mut controller, _store) = controller_with(scenario_cart()).await;
        controller.remove_item(ItemId::new(2)).unwrap();

        controller
            .handle(UiEvent::RemoveClicked { id: ItemId::new(2) })
            .unwrap();
        controller
            .handle(UiEvent::QuantityChanged {
                id: ItemId::new(2),
                raw: "4".to_string(),
            })
            .unwrap();

        assert!(!controller.surface().is_modal_open());
        assert_eq!(controller.pending_removal(), None);
        assert_eq!(controller.items(), [item(1, 10, 2)].as_slice());
    }

    // =========================================================================
    // Out-of-range amounts
    // =========================================================================

    const VAULT_CART: &str =
        r#"[{"id":1,"title":"Vault","price":100000000000000000000,"quantity":1,"image":""}]"#;

    async fn controller_from_json(json: &str) -> (TestController, MemoryStore) {
        let store = MemoryStore::new();
        store.set("cart", json).unwrap();
        let mut controller =
            CartController::new(CartStorage::new(store.clone(), "cart"), PageSurface::new());
        controller.initialize(&FailingSource).await.unwrap();
        (controller, store)
    }

    #[tokio::test]
    async fn test_huge_quantity_keeps_previous_cart() {
        let (mut controller, store) = controller_from_json(VAULT_CART).await;
        let subtotal = controller.surface().subtotal().to_string();

        controller
            .handle(UiEvent::QuantityChanged {
                id: ItemId::new(1),
                raw: "4294967295".to_string(),
            })
            .unwrap();

        assert_eq!(controller.items()[0].quantity, Quantity::ONE);
        assert_eq!(stored(&store)[0].quantity, Quantity::ONE);
        assert_eq!(controller.surface().subtotal(), subtotal);
        assert_eq!(
            controller.surface().pending_notifications(),
            [Notification::QUANTITY_TOO_HIGH]
        );

        // The stored cart still loads after a restart.
        let mut restarted =
            CartController::new(CartStorage::new(store, "cart"), PageSurface::new());
        let hydration = restarted.initialize(&FailingSource).await.unwrap();
        assert_eq!(hydration, Hydration::Stored { count: 1 });
    }

    #[tokio::test]
    async fn test_update_quantity_out_of_range_is_an_error() {
        let (mut controller, store) = controller_from_json(VAULT_CART).await;

        let err = controller
            .update_item_quantity(ItemId::new(1), Quantity::new(u32::MAX).unwrap())
            .unwrap_err();

        assert!(matches!(err, CartError::Amount(_)));
        assert_eq!(controller.items()[0].quantity, Quantity::ONE);
        assert_eq!(stored(&store)[0].quantity, Quantity::ONE);
        assert_eq!(controller.totals().subtotal, controller.items()[0].price);
    }

    #[tokio::test]
    async fn test_stored_cart_out_of_range_is_fatal() {
        let store = MemoryStore::new();
        store
            .set(
                "cart",
                r#"[{"id":1,"title":"A","price":50000000000000000000000000000,"quantity":1,"image":""},
                    {"id":2,"title":"B","price":50000000000000000000000000000,"quantity":1,"image":""}]"#,
            )
            .unwrap();
        let mut controller =
            CartController::new(CartStorage::new(store, "cart"), PageSurface::new());

        let err = controller.initialize(&FailingSource).await.unwrap_err();
        assert!(matches!(err, CartError::Amount(_)));
        assert!(controller.items().is_empty());
    }

    #[tokio::test]
    async fn test_fetched_cart_out_of_range_is_not_stored() {
        let huge = CartItem {
            price: Price::new(Decimal::MAX),
            ..item(1, 0, 1)
        };
        let fetched = vec![
            huge.clone(),
            CartItem {
                id: ItemId::new(2),
                ..huge
            },
        ];
        let store = MemoryStore::new();
        let mut controller =
            CartController::new(CartStorage::new(store.clone(), "cart"), PageSurface::new());

        let hydration = controller
            .initialize(&StaticSource::new(fetched))
            .await
            .unwrap();

        assert_eq!(hydration, Hydration::Failed);
        assert!(controller.items().is_empty());
        assert_eq!(store.get("cart").unwrap(), None);
        assert_eq!(
            controller.surface().pending_notifications(),
            [Notification::LOAD_FAILED]
        );
    }
}
