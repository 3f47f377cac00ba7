//! Remote cart API client.
//!
//! Fetches the initial cart from a JSON endpoint when nothing is stored
//! locally. The payload is validated against an explicit schema; a record
//! missing any required field rejects the whole payload.
//!
//! # Payload
//!
//! ```json
//! {
//!   "items": [
//!     {
//!       "id": 49123456789,
//!       "title": "Linen Shirt",
//!       "presentment_price": 129950,
//!       "quantity": 1,
//!       "featured_image": { "url": "https://cdn.shopify.com/..." }
//!     }
//!   ]
//! }
//! ```
//!
//! `presentment_price` is in minor units and is divided by 100.

use std::future::Future;
use std::time::Duration;

use cart_widget_core::{CartItem, ItemId, Price, Quantity};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Default cart endpoint.
pub const DEFAULT_CART_API_URL: &str =
    "https://cdn.shopify.com/s/files/1/0883/2188/4479/files/apiCartData.json?v=1728384889";

/// Errors that can occur when fetching the remote cart.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("API error: status {status}")]
    Status { status: u16 },

    /// Response body did not match the cart schema.
    #[error("Malformed cart payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A source of the initial cart.
pub trait CartSource: Send + Sync {
    /// Fetch the initial cart items.
    fn fetch_initial_cart(&self) -> impl Future<Output = Result<Vec<CartItem>, FetchError>> + Send;
}

/// Remote cart payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCart {
    pub items: Vec<RemoteLineItem>,
}

/// A single remote line item.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteLineItem {
    pub id: ItemId,
    pub title: String,
    /// Unit price in minor units.
    pub presentment_price: i64,
    pub quantity: i64,
    pub featured_image: FeaturedImage,
}

/// Remote image reference.
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedImage {
    pub url: String,
}

impl From<RemoteLineItem> for CartItem {
    fn from(line: RemoteLineItem) -> Self {
        if line.quantity <= 0 {
            tracing::warn!(
                id = %line.id,
                quantity = line.quantity,
                "Remote line item has non-positive quantity, using 1"
            );
        }
        Self {
            id: line.id,
            title: line.title,
            price: Price::from_minor_units(line.presentment_price),
            quantity: Quantity::coerce(line.quantity),
            image: line.featured_image.url,
        }
    }
}

/// Parse a remote cart payload into cart items.
///
/// # Errors
///
/// Returns [`FetchError::Malformed`] if the payload does not match the schema.
pub fn parse_cart(raw: &str) -> Result<Vec<CartItem>, FetchError> {
    let cart: RemoteCart = serde_json::from_str(raw)?;
    Ok(cart.items.into_iter().map(CartItem::from).collect())
}

/// HTTP client for the remote cart endpoint.
#[derive(Debug, Clone)]
pub struct RemoteCartClient {
    client: reqwest::Client,
    url: Url,
}

impl RemoteCartClient {
    /// Create a new client for `url`.
    ///
    /// With no `timeout` a stalled request waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    /// The endpoint this client fetches from.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl CartSource for RemoteCartClient {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_initial_cart(&self) -> Result<Vec<CartItem>, FetchError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let items = parse_cart(&body)?;
        tracing::info!(count = items.len(), "Fetched remote cart");
        Ok(items)
    }
}
