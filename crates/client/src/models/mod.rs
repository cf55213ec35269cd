//! Wire payloads for the backend API.
//!
//! The backend speaks camelCase JSON; every struct here carries the
//! corresponding serde renames. Money is decimal, never floating point.

pub mod order;
pub mod payment;
pub mod restaurant;
pub mod review;
pub mod user;

pub use order::{
    ContactInfo, CreateOrderRequest, DeliveryAddress, Order, OrderItem, UpdateOrderStatusRequest,
};
pub use payment::{PaymentMethod, PaymentReceipt, ProcessPaymentRequest};
pub use restaurant::{MenuItem, Restaurant, RestaurantQuery};
pub use review::{CreateReviewRequest, Review};
pub use user::{AuthResponse, Credentials, RegisterRequest, UserRecord, UserUpdate};

use serde::Deserialize;

/// Response of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Backend-reported status string (`"ok"` when healthy).
    pub status: String,
}
