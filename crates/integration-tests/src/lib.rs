//! Integration test support for the cart widget.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cart-widget-integration-tests
//! ```
//!
//! The tests need no external services: [`FakeCartApi`] binds an axum
//! server on an ephemeral localhost port and stands in for the remote cart
//! endpoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Router, extract::State, http::StatusCode, routing::get};
use url::Url;

/// Canned response served by [`FakeCartApi`].
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: StatusCode,
    pub body: String,
}

impl CannedResponse {
    /// A 200 response with `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    /// An error response with an empty body.
    #[must_use]
    pub const fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

#[derive(Clone)]
struct ApiState {
    response: CannedResponse,
    hits: Arc<AtomicUsize>,
}

/// A local HTTP server that answers `GET /cart.json` with a canned response.
pub struct FakeCartApi {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    server: tokio::task::JoinHandle<()>,
}

impl FakeCartApi {
    /// Start serving `response` on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(response: CannedResponse) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = ApiState {
            response,
            hits: Arc::clone(&hits),
        };
        let app = Router::new()
            .route("/cart.json", get(serve_cart))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake cart API");
        let addr = listener.local_addr().expect("fake cart API address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, hits, server }
    }

    /// URL of the cart endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a valid URL.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/cart.json", self.addr)).expect("fake cart API URL")
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for FakeCartApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn serve_cart(State(state): State<ApiState>) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (state.response.status, state.response.body.clone())
}

/// A remote payload with two items: `[{id:1, 10.00, x2}, {id:2, 5.00, x1}]`.
#[must_use]
pub fn two_item_payload() -> String {
    r#"{
        "items": [
            {
                "id": 1,
                "title": "Asgaard sofa",
                "presentment_price": 1000,
                "quantity": 2,
                "featured_image": { "url": "https://cdn.example.com/sofa.png" }
            },
            {
                "id": 2,
                "title": "Cushion",
                "presentment_price": 500,
                "quantity": 1,
                "featured_image": { "url": "https://cdn.example.com/cushion.png" }
            }
        ]
    }"#
    .to_string()
}
