//! Cart persistence.
//!
//! The whole cart lives under a single key of a string key-value store,
//! serialized as a JSON array of line items. Loading happens once at startup;
//! every mutation overwrites the key with the full current cart.
//!
//! # Backends
//!
//! - [`FileStore`] - JSON object file on disk, the process-local analogue of
//!   browser local storage
//! - [`MemoryStore`] - in-process map, used by tests

mod file;
mod memory;

use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use cart_widget_core::CartItem;
use thiserror::Error;
use tracing::instrument;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Default storage key for the cart.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Errors raised by storage backends and the cart adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a JSON object of strings.
    #[error("Corrupt store file {}: {source}", path.display())]
    CorruptFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The stored cart does not match the expected item shape.
    #[error("Corrupt cart under key {key:?}: {source}")]
    CorruptCart {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the cart failed.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Another thread panicked while holding the store lock.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// A string key-value store.
///
/// Methods take `&self`; implementations use interior mutability so a
/// store can be shared behind an `Arc`.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Loads and saves the cart under a fixed key.
#[derive(Debug)]
pub struct CartStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartStorage<S> {
    /// Create an adapter over `store` using `key`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The key the cart is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Read the stored cart.
    ///
    /// A missing key, or a stored JSON `null`, is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CorruptCart`] if the stored text is not a
    /// valid cart, or a backend error if the store cannot be read.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Result<Vec<CartItem>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            tracing::debug!("No stored cart");
            return Ok(Vec::new());
        };

        let items: Option<Vec<CartItem>> =
            serde_json::from_str(&raw).map_err(|source| StorageError::CorruptCart {
                key: self.key.clone(),
                source,
            })?;
        let items = items.unwrap_or_default();
        tracing::debug!(count = items.len(), "Loaded stored cart");
        Ok(items)
    }

    /// Overwrite the stored cart with `items`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the store cannot be written.
    #[instrument(skip(self, items), fields(key = %self.key, count = items.len()))]
    pub fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items).map_err(StorageError::Serialize)?;
        self.store.set(&self.key, &raw)
    }
}
