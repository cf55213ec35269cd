//! Restaurant and menu payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tavola_core::{MenuItemId, RestaurantId};

/// A restaurant as returned by the listing and detail endpoints.
///
/// The listing endpoint omits `menu`; only `GET /restaurants/:id` includes
/// it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub description: String,
    pub cuisine: String,
    pub rating: f64,
    pub review_count: u32,
    /// Relative price bucket, e.g. `"$$"`.
    pub price_range: String,
    /// Human-readable estimate, e.g. `"25-35 min"`.
    pub delivery_time: String,
    pub delivery_fee: Decimal,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub open_now: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

/// A single dish on a restaurant's menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub popular: bool,
}

/// Query parameters for `GET /restaurants`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RestaurantQuery {
    /// Filter by cuisine name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    /// Sort key understood by the backend (`rating`, `delivery_time`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const LISTING_JSON: &str = r#"{
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
        "tags": ["pasta", "vegetarian"]
    }"#;

    #[test]
    fn test_listing_payload_without_menu() {
        let restaurant: Restaurant = serde_json::from_str(LISTING_JSON).unwrap();
        assert_eq!(restaurant.name, "Pasta Palace");
        assert_eq!(restaurant.delivery_fee, Decimal::new(299, 2));
        assert!(restaurant.menu.is_empty());
        assert!(!restaurant.open_now);
        assert_eq!(restaurant.tags, vec!["pasta", "vegetarian"]);
    }

    #[test]
    fn test_menu_item_price_is_decimal_string() {
        let item: MenuItem = serde_json::from_str(
            r#"{"id":3,"name":"Carbonara","description":"Classic","price":"14.50","popular":true}"#,
        )
        .unwrap();
        assert_eq!(item.price, Decimal::new(1450, 2));
        assert!(item.popular);
        assert!(item.image.is_none());
    }

    #[test]
    fn test_query_skips_absent_params() {
        let query = RestaurantQuery {
            cuisine: Some("Italian".to_string()),
            sort: None,
        };
        let encoded = serde_json::to_value(&query).unwrap();
        assert_eq!(encoded.as_object().unwrap().len(), 1);
    }
}
