//! Integration tests for ToolQuote.
//!
//! The two backend collaborators (catalog feed and quote backend) are mocked
//! with in-process `axum` servers bound to ephemeral ports, so the tests run
//! without external services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p toolquote-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_feed` - Feed fetching, refresh, filtering, grid reconciliation
//! - `quote_flow` - The submit/present/send state machine end to end
//! - `cart_persistence` - Cart durability across sessions

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use url::Url;

use toolquote_core::Product;

/// Fake PDF bytes the mock quote backend serves.
pub const FAKE_PDF: &[u8] = b"%PDF-1.4 toolquote test document";

// =============================================================================
// Mock catalog feed
// =============================================================================

/// In-process catalog feed with a mutable product list.
#[derive(Clone)]
pub struct MockCatalog {
    /// Feed endpoint.
    pub url: Url,
    products: Arc<RwLock<Vec<Product>>>,
    failing: Arc<AtomicBool>,
}

impl MockCatalog {
    /// Spawn the feed server with an initial product list.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind an ephemeral port.
    pub async fn spawn(products: Vec<Product>) -> Self {
        let products = Arc::new(RwLock::new(products));
        let failing = Arc::new(AtomicBool::new(false));

        let state = (products.clone(), failing.clone());
        let app = Router::new().route("/", get(serve_catalog)).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind catalog mock");
        let addr = listener.local_addr().expect("catalog mock addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let url = format!("http://{addr}/").parse().expect("catalog mock url");
        Self {
            url,
            products,
            failing,
        }
    }

    /// Replace the product list served by the feed.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_products(&self, products: Vec<Product>) {
        *self.products.write().expect("catalog mock lock") = products;
    }

    /// Make the feed answer 500 until re-enabled.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

async fn serve_catalog(
    State((products, failing)): State<(Arc<RwLock<Vec<Product>>>, Arc<AtomicBool>)>,
) -> impl IntoResponse {
    if failing.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!([]))).into_response();
    }
    let list = products.read().expect("catalog mock lock").clone();
    Json(list).into_response()
}

// =============================================================================
// Mock quote backend
// =============================================================================

struct QuoteBackendState {
    fail_generate: AtomicBool,
    fail_send: AtomicBool,
    send_count: AtomicUsize,
    last_request: Mutex<Option<serde_json::Value>>,
}

/// In-process quote backend: generation envelope plus a `/send` endpoint.
#[derive(Clone)]
pub struct MockQuoteBackend {
    /// Generation endpoint (`/send` is appended for dispatch).
    pub url: Url,
    state: Arc<QuoteBackendState>,
}

impl MockQuoteBackend {
    /// Spawn the backend server.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind an ephemeral port.
    pub async fn spawn() -> Self {
        let state = Arc::new(QuoteBackendState {
            fail_generate: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
            send_count: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        });

        let app = Router::new()
            .route("/", post(serve_generate))
            .route("/send", post(serve_send))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind quote mock");
        let addr = listener.local_addr().expect("quote mock addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let url = format!("http://{addr}/").parse().expect("quote mock url");
        Self { url, state }
    }

    /// Make generation answer 500 until re-enabled.
    pub fn set_fail_generate(&self, failing: bool) {
        self.state.fail_generate.store(failing, Ordering::SeqCst);
    }

    /// Make dispatch report `ok: false` until re-enabled.
    pub fn set_fail_send(&self, failing: bool) {
        self.state.fail_send.store(failing, Ordering::SeqCst);
    }

    /// How many dispatches succeeded.
    pub fn send_count(&self) -> usize {
        self.state.send_count.load(Ordering::SeqCst)
    }

    /// The last request body the backend received, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn last_request(&self) -> Option<serde_json::Value> {
        self.state.last_request.lock().expect("quote mock lock").clone()
    }
}

async fn serve_generate(
    State(state): State<Arc<QuoteBackendState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    *state.last_request.lock().expect("quote mock lock") = Some(body);
    if state.fail_generate.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "generator offline"})),
        )
            .into_response();
    }
    Json(serde_json::json!({
        "document": BASE64.encode(FAKE_PDF),
        "recipients": ["sales@example.com"],
    }))
    .into_response()
}

async fn serve_send(
    State(state): State<Arc<QuoteBackendState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    *state.last_request.lock().expect("quote mock lock") = Some(body);
    if state.fail_send.load(Ordering::SeqCst) {
        return Json(serde_json::json!({"ok": false, "message": "smtp unavailable"}));
    }
    state.send_count.fetch_add(1, Ordering::SeqCst);
    Json(serde_json::json!({"ok": true}))
}

// =============================================================================
// Fixtures
// =============================================================================

/// A product fixture with sensible defaults.
#[must_use]
pub fn product(id: &str, name: &str, brand: &str, purpose: &str, stock: u32) -> Product {
    Product {
        id: toolquote_core::ProductId::new(id),
        name: name.to_owned(),
        brand: brand.to_owned(),
        purpose: purpose.to_owned(),
        kind: None,
        description: None,
        image_url: None,
        available_stock: stock,
    }
}

/// A small catalog spanning two brands and two purposes.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![
        product("drill-1", "Impact Drill", "Makita", "Drilling", 5),
        product("drill-2", "Hammer Drill", "Bosch", "Drilling", 3),
        product("saw-1", "Circular Saw", "Makita", "Cutting", 2),
        product("saw-2", "Jigsaw", "Bosch", "Cutting", 8),
    ]
}
