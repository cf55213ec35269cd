//! Review endpoints.

use tavola_core::RestaurantId;

use crate::error::GatewayError;
use crate::models::{CreateReviewRequest, Review};

use super::Gateway;

impl Gateway {
    /// `POST /reviews` - leave a review for a restaurant.
    ///
    /// # Errors
    ///
    /// Default message: `"Failed to create review"`.
    pub async fn create_review(&self, request: &CreateReviewRequest) -> Result<Review, GatewayError> {
        self.post("/reviews", request, "Failed to create review")
            .await
    }

    /// `GET /reviews/restaurant/:id` - all reviews for a restaurant.
    ///
    /// # Errors
    ///
    /// Default message: `"Failed to fetch reviews"`.
    pub async fn restaurant_reviews(&self, id: RestaurantId) -> Result<Vec<Review>, GatewayError> {
        self.get(
            &format!("/reviews/restaurant/{id}"),
            "Failed to fetch reviews",
        )
        .await
    }
}
