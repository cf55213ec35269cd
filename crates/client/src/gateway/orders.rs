//! Order endpoints.

use tavola_core::{OrderId, OrderStatus};
use tracing::instrument;

use crate::error::GatewayError;
use crate::models::{CreateOrderRequest, Order, UpdateOrderStatusRequest};

use super::Gateway;

impl Gateway {
    /// `POST /orders` - place an order.
    ///
    /// # Errors
    ///
    /// Default message: `"Failed to create order"`.
    #[instrument(skip_all, fields(restaurant_id = %request.restaurant_id, items = request.items.len()))]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, GatewayError> {
        self.post("/orders", request, "Failed to create order").await
    }

    /// `GET /orders/:id` - fetch one order.
    ///
    /// # Errors
    ///
    /// Default message: `"Failed to fetch order"`.
    pub async fn get_order(&self, id: OrderId) -> Result<Order, GatewayError> {
        self.get(&format!("/orders/{id}"), "Failed to fetch order")
            .await
    }

    /// `GET /orders/user` - the authenticated user's order history.
    ///
    /// # Errors
    ///
    /// Default message: `"Failed to fetch orders"`.
    pub async fn user_orders(&self) -> Result<Vec<Order>, GatewayError> {
        self.get("/orders/user", "Failed to fetch orders").await
    }

    /// `PATCH /orders/:id/status` - request a status transition.
    ///
    /// # Errors
    ///
    /// Default message: `"Failed to update order status"`.
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, GatewayError> {
        self.patch(
            &format!("/orders/{id}/status"),
            &UpdateOrderStatusRequest { status },
            "Failed to update order status",
        )
        .await
    }
}
