//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::config::WidgetConfig;
use crate::controller::CartController;
use crate::storage::{CartStorage, KeyValueStore};
use crate::surface::PageSurface;

/// Store type used by the running server.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Controller type used by the running server.
pub type WidgetController = CartController<SharedStore, PageSurface>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart controller sits
/// behind an async mutex: each handler holds the lock for the whole of one
/// interaction, so interactions never interleave.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WidgetConfig,
    cart: Mutex<WidgetController>,
}

impl AppState {
    /// Create a new application state around an already initialized controller.
    #[must_use]
    pub fn new(config: WidgetConfig, cart: WidgetController) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Build an uninitialized controller for `store` using the configured key.
    #[must_use]
    pub fn controller(config: &WidgetConfig, store: SharedStore) -> WidgetController {
        CartController::new(
            CartStorage::new(store, config.storage.key.clone()),
            PageSurface::new(),
        )
    }

    /// Get a reference to the widget configuration.
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }

    /// Lock the cart for one interaction.
    pub async fn cart(&self) -> MutexGuard<'_, WidgetController> {
        self.inner.cart.lock().await
    }
}
