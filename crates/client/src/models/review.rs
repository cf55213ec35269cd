//! Review payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tavola_core::{RestaurantId, ReviewId};

/// A review as returned by `GET /reviews/restaurant/:id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub restaurant_id: RestaurantId,
    /// Display name of the reviewer.
    pub user: String,
    /// Star rating, 1-5.
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
    /// Number of "helpful" votes.
    #[serde(default)]
    pub helpful: u32,
}

/// Body of `POST /reviews`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub restaurant_id: RestaurantId,
    pub rating: u8,
    pub comment: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_review_deserializes_with_default_helpful() {
        let review: Review = serde_json::from_str(
            r#"{
                "id": 5,
                "restaurantId": 1,
                "user": "A",
                "rating": 4,
                "comment": "Great carbonara",
                "date": "2026-07-15T18:30:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(review.rating, 4);
        assert_eq!(review.helpful, 0);
    }

    #[test]
    fn test_create_request_wire_format() {
        let body = CreateReviewRequest {
            restaurant_id: RestaurantId::new(1),
            rating: 5,
            comment: "Excellent".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"restaurantId":1,"rating":5,"comment":"Excellent"}"#
        );
    }
}
