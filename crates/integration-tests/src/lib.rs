//! In-process stub backend for Tavola integration tests.
//!
//! [`StubBackend::spawn`] binds an axum server to an ephemeral port and
//! serves a small fixed dataset under `/api`. Behavior is keyed on the
//! request so tests stay declarative:
//!
//! - login succeeds for `a@b.com` / `hunter2` with token `t1`, anything
//!   else gets 400 `{"message": "Invalid credentials"}`
//! - registering `taken@example.com` gets 409
//! - bearer tokens `t1` and `t2` are accepted; everything else is 401
//! - logout with bearer `broken` fails with 500 (for best-effort tests)
//! - searching for `boom` returns a 500 with a non-JSON body (for
//!   default-message tests)

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use axum::Router;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::Json;
use serde_json::{Value, json};

/// Email/password pair the stub accepts.
pub const VALID_EMAIL: &str = "a@b.com";
pub const VALID_PASSWORD: &str = "hunter2";

/// Token issued on login.
pub const LOGIN_TOKEN: &str = "t1";
/// Token issued on registration.
pub const REGISTER_TOKEN: &str = "t2";
/// Token whose logout call fails server-side.
pub const BROKEN_TOKEN: &str = "broken";

/// A running stub backend. Dropping it aborts the server task.
pub struct StubBackend {
    /// Base URL including the `/api` prefix, for `ClientConfig`.
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

/// Install a fmt subscriber honoring `RUST_LOG`, once per process.
fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

impl StubBackend {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        init_tracing();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router()).await.expect("serve stub");
        });
        Self {
            base_url: format!("http://{addr}/api"),
            handle,
        }
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn router() -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth_register))
        .route("/auth/login", post(auth_login))
        .route("/auth/logout", post(auth_logout))
        .route("/auth/profile", get(auth_profile))
        .route("/restaurants", get(restaurants_list))
        .route("/restaurants/search", get(restaurants_search))
        .route("/restaurants/{id}", get(restaurants_get))
        .route("/orders", post(orders_create))
        .route("/orders/user", get(orders_user))
        .route("/orders/{id}", get(orders_get))
        .route("/orders/{id}/status", patch(orders_update_status))
        .route("/payments/process", post(payments_process))
        .route("/payments/methods", get(payments_methods))
        .route("/reviews", post(reviews_create))
        .route("/reviews/restaurant/{id}", get(reviews_for_restaurant));
    Router::new().nest("/api", api)
}

// =============================================================================
// Fixtures
// =============================================================================

fn customer() -> Value {
    json!({"id": 1, "name": "A", "email": VALID_EMAIL, "role": "customer"})
}

fn pasta_palace(with_menu: bool) -> Value {
    let mut restaurant = json!({
        "id": 1,
        "name": "Pasta Palace",
        "description": "Fresh pasta daily",
        "cuisine": "Italian",
        "rating": 4.6,
        "reviewCount": 212,
        "priceRange": "$$",
        "deliveryTime": "25-35 min",
        "deliveryFee": "2.99",
        "address": "12 Via Roma",
        "openNow": true,
        "tags": ["pasta", "vegetarian"]
    });
    if with_menu {
        restaurant["menu"] = json!([
            {"id": 3, "name": "Carbonara", "description": "Classic", "price": "14.50", "popular": true},
            {"id": 4, "name": "Margherita", "description": "Tomato and basil", "price": "11.00"}
        ]);
    }
    restaurant
}

fn sushi_stop() -> Value {
    json!({
        "id": 2,
        "name": "Sushi Stop",
        "description": "Rolls and nigiri",
        "cuisine": "Japanese",
        "rating": 4.8,
        "reviewCount": 98,
        "priceRange": "$$$",
        "deliveryTime": "30-40 min",
        "deliveryFee": "3.99",
        "address": "4 Ocean Ave",
        "openNow": true,
        "tags": ["sushi"]
    })
}

fn sample_order(status: &str) -> Value {
    json!({
        "id": 100,
        "restaurantId": 1,
        "items": [
            {"menuItemId": 3, "name": "Carbonara", "price": "14.50", "quantity": 1}
        ],
        "deliveryAddress": {"street": "1 Main St", "city": "Springfield", "state": "IL", "zipCode": "62701"},
        "contact": {"name": "A", "email": VALID_EMAIL, "phone": "555-0100"},
        "total": "14.50",
        "status": status,
        "createdAt": "2026-08-01T12:00:00Z"
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn is_authorized(headers: &HeaderMap) -> bool {
    matches!(bearer(headers), Some(LOGIN_TOKEN | REGISTER_TOKEN))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Unauthorized"})),
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn auth_register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "An account with this email already exists"})),
        )
            .into_response();
    }
    let user = json!({
        "id": 2,
        "name": body["name"],
        "email": body["email"],
        "role": body["role"]
    });
    (
        StatusCode::CREATED,
        Json(json!({"user": user, "token": REGISTER_TOKEN})),
    )
        .into_response()
}

async fn auth_login(Json(body): Json<Value>) -> Response {
    if body["email"] == VALID_EMAIL && body["password"] == VALID_PASSWORD {
        Json(json!({"user": customer(), "token": LOGIN_TOKEN})).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn auth_logout(headers: HeaderMap) -> Response {
    if bearer(&headers) == Some(BROKEN_TOKEN) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "boom"})),
        )
            .into_response();
    }
    Json(json!({"message": "Logged out"})).into_response()
}

async fn auth_profile(headers: HeaderMap) -> Response {
    if is_authorized(&headers) {
        Json(customer()).into_response()
    } else {
        unauthorized()
    }
}

async fn restaurants_list(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let all = [pasta_palace(false), sushi_stop()];
    let filtered: Vec<Value> = all
        .into_iter()
        .filter(|r| {
            params
                .get("cuisine")
                .is_none_or(|cuisine| r["cuisine"] == cuisine.as_str())
        })
        .collect();
    Json(Value::Array(filtered))
}

async fn restaurants_search(Query(params): Query<HashMap<String, String>>) -> Response {
    let query = params.get("q").cloned().unwrap_or_default().to_lowercase();
    if query == "boom" {
        // Non-JSON error body; clients should fall back to their default
        // message.
        return (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response();
    }
    let matches: Vec<Value> = [pasta_palace(false), sushi_stop()]
        .into_iter()
        .filter(|r| {
            r["name"]
                .as_str()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&query)
        })
        .collect();
    Json(Value::Array(matches)).into_response()
}

async fn restaurants_get(Path(id): Path<i32>) -> Response {
    if id == 1 {
        Json(pasta_palace(true)).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Restaurant not found"})),
        )
            .into_response()
    }
}

async fn orders_create(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    let mut order = body;
    order["id"] = json!(100);
    order["status"] = json!("pending");
    order["createdAt"] = json!("2026-08-01T12:00:00Z");
    (StatusCode::CREATED, Json(order)).into_response()
}

async fn orders_user(headers: HeaderMap) -> Response {
    if is_authorized(&headers) {
        Json(json!([sample_order("delivered")])).into_response()
    } else {
        unauthorized()
    }
}

async fn orders_get(headers: HeaderMap, Path(id): Path<i32>) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    if id == 100 {
        Json(sample_order("pending")).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Order not found"})),
        )
            .into_response()
    }
}

async fn orders_update_status(
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    if id != 100 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Order not found"})),
        )
            .into_response();
    }
    let status = body["status"].as_str().unwrap_or("pending").to_string();
    Json(sample_order(&status)).into_response()
}

async fn payments_process(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "id": 7,
        "orderId": body["orderId"],
        "status": "completed",
        "amount": body["amount"]
    }))
    .into_response()
}

async fn payments_methods() -> Json<Value> {
    Json(json!([
        {"id": "card", "name": "Credit card"},
        {"id": "cash", "name": "Cash on delivery"}
    ]))
}

async fn reviews_create(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 9,
            "restaurantId": body["restaurantId"],
            "user": "A",
            "rating": body["rating"],
            "comment": body["comment"],
            "date": "2026-08-02T09:00:00Z",
            "helpful": 0
        })),
    )
        .into_response()
}

async fn reviews_for_restaurant(Path(id): Path<i32>) -> Json<Value> {
    Json(json!([
        {
            "id": 5,
            "restaurantId": id,
            "user": "A",
            "rating": 4,
            "comment": "Great carbonara",
            "date": "2026-07-15T18:30:00Z",
            "helpful": 3
        }
    ]))
}
