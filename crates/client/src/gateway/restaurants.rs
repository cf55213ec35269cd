//! Restaurant browsing endpoints.

use tavola_core::RestaurantId;

use crate::error::GatewayError;
use crate::models::{Restaurant, RestaurantQuery};

use super::Gateway;

impl Gateway {
    /// `GET /restaurants` - list restaurants, optionally filtered/sorted.
    ///
    /// # Errors
    ///
    /// Default message: `"Failed to fetch restaurants"`.
    pub async fn list_restaurants(
        &self,
        query: &RestaurantQuery,
    ) -> Result<Vec<Restaurant>, GatewayError> {
        self.get_with_query("/restaurants", query, "Failed to fetch restaurants")
            .await
    }

    /// `GET /restaurants/:id` - fetch one restaurant including its menu.
    ///
    /// # Errors
    ///
    /// Default message: `"Failed to fetch restaurant"`.
    pub async fn get_restaurant(&self, id: RestaurantId) -> Result<Restaurant, GatewayError> {
        self.get(&format!("/restaurants/{id}"), "Failed to fetch restaurant")
            .await
    }

    /// `GET /restaurants/search?q=` - full-text search.
    ///
    /// # Errors
    ///
    /// Default message: `"Search failed"`.
    pub async fn search_restaurants(&self, query: &str) -> Result<Vec<Restaurant>, GatewayError> {
        self.get_with_query("/restaurants/search", &[("q", query)], "Search failed")
            .await
    }
}
