//! Typed endpoint wrappers against the stub backend: happy paths plus
//! error-message normalization (server message preferred, endpoint default
//! otherwise).

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;
use tavola_client::{
    ClientConfig, ContactInfo, CreateOrderRequest, CreateReviewRequest, Credentials,
    DeliveryAddress, Gateway, MemoryCredentialStore, OrderItem, ProcessPaymentRequest,
    RestaurantQuery, Session,
};
use tavola_core::{MenuItemId, OrderId, OrderStatus, PaymentStatus, RestaurantId};
use tavola_integration_tests::{StubBackend, VALID_EMAIL, VALID_PASSWORD};

async fn setup() -> (StubBackend, Arc<Gateway>) {
    let backend = StubBackend::spawn().await;
    let config = ClientConfig::with_base_url(&backend.base_url).unwrap();
    let gateway = Arc::new(Gateway::new(
        &config,
        Arc::new(MemoryCredentialStore::new()) as _,
    ));
    (backend, gateway)
}

async fn login(gateway: &Arc<Gateway>) {
    let mut session = Session::new(Arc::clone(gateway));
    let credentials = Credentials {
        email: VALID_EMAIL.parse().unwrap(),
        password: VALID_PASSWORD.to_string(),
    };
    session.login(&credentials).await.unwrap();
}

fn sample_order_request() -> CreateOrderRequest {
    CreateOrderRequest {
        restaurant_id: RestaurantId::new(1),
        items: vec![OrderItem {
            menu_item_id: MenuItemId::new(3),
            name: "Carbonara".to_string(),
            price: Decimal::new(1450, 2),
            quantity: 1,
        }],
        delivery_address: DeliveryAddress {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            instructions: None,
        },
        contact: ContactInfo {
            name: "A".to_string(),
            email: VALID_EMAIL.parse().unwrap(),
            phone: "555-0100".to_string(),
        },
        total: Decimal::new(1450, 2),
    }
}

// =============================================================================
// Restaurants
// =============================================================================

#[tokio::test]
async fn list_restaurants_returns_all() {
    let (_backend, gateway) = setup().await;
    let restaurants = gateway
        .list_restaurants(&RestaurantQuery::default())
        .await
        .unwrap();
    assert_eq!(restaurants.len(), 2);
    assert_eq!(restaurants[0].name, "Pasta Palace");
    assert!(restaurants[0].menu.is_empty());
}

#[tokio::test]
async fn list_restaurants_filters_by_cuisine() {
    let (_backend, gateway) = setup().await;
    let query = RestaurantQuery {
        cuisine: Some("Japanese".to_string()),
        sort: None,
    };
    let restaurants = gateway.list_restaurants(&query).await.unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].name, "Sushi Stop");
}

#[tokio::test]
async fn get_restaurant_includes_the_menu() {
    let (_backend, gateway) = setup().await;
    let restaurant = gateway.get_restaurant(RestaurantId::new(1)).await.unwrap();
    assert_eq!(restaurant.menu.len(), 2);
    assert_eq!(restaurant.menu[0].price, Decimal::new(1450, 2));
    assert!(restaurant.menu[0].popular);
    assert_eq!(restaurant.delivery_fee, Decimal::new(299, 2));
}

#[tokio::test]
async fn get_restaurant_not_found_uses_the_server_message() {
    let (_backend, gateway) = setup().await;
    let error = gateway
        .get_restaurant(RestaurantId::new(99))
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "Restaurant not found");
    assert_eq!(error.status(), Some(404));
}

#[tokio::test]
async fn search_matches_by_name() {
    let (_backend, gateway) = setup().await;
    let matches = gateway.search_restaurants("sushi").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, RestaurantId::new(2));
}

#[tokio::test]
async fn search_falls_back_to_the_default_message_on_unparseable_errors() {
    let (_backend, gateway) = setup().await;
    // The stub replies 500 with a non-JSON body for this query.
    let error = gateway.search_restaurants("boom").await.unwrap_err();
    assert_eq!(error.to_string(), "Search failed");
    assert_eq!(error.status(), Some(500));
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn create_order_requires_authentication() {
    let (_backend, gateway) = setup().await;
    let error = gateway
        .create_order(&sample_order_request())
        .await
        .unwrap_err();
    assert!(error.is_unauthorized());
}

#[tokio::test]
async fn create_and_fetch_an_order() {
    let (_backend, gateway) = setup().await;
    login(&gateway).await;

    let created = gateway.create_order(&sample_order_request()).await.unwrap();
    assert_eq!(created.id, OrderId::new(100));
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.total_price().display(), "$14.50");

    let fetched = gateway.get_order(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.items.len(), 1);
}

#[tokio::test]
async fn user_orders_lists_history() {
    let (_backend, gateway) = setup().await;
    login(&gateway).await;

    let orders = gateway.user_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Delivered);
}

#[tokio::test]
async fn update_order_status_roundtrips_the_new_status() {
    let (_backend, gateway) = setup().await;
    login(&gateway).await;

    let order = gateway
        .update_order_status(OrderId::new(100), OrderStatus::OutForDelivery)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::OutForDelivery);
}

// =============================================================================
// Payments
// =============================================================================

#[tokio::test]
async fn process_payment_returns_a_completed_receipt() {
    let (_backend, gateway) = setup().await;
    login(&gateway).await;

    let receipt = gateway
        .process_payment(&ProcessPaymentRequest {
            order_id: OrderId::new(100),
            method: "card".to_string(),
            amount: Decimal::new(1450, 2),
        })
        .await
        .unwrap();
    assert_eq!(receipt.status, PaymentStatus::Completed);
    assert_eq!(receipt.order_id, OrderId::new(100));
    assert_eq!(receipt.amount, Decimal::new(1450, 2));
}

#[tokio::test]
async fn payment_methods_are_listed() {
    let (_backend, gateway) = setup().await;
    let methods = gateway.payment_methods().await.unwrap();
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].id, "card");
}

// =============================================================================
// Reviews & health
// =============================================================================

#[tokio::test]
async fn create_review_and_list_for_restaurant() {
    let (_backend, gateway) = setup().await;
    login(&gateway).await;

    let review = gateway
        .create_review(&CreateReviewRequest {
            restaurant_id: RestaurantId::new(1),
            rating: 5,
            comment: "Excellent".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(review.rating, 5);

    let reviews = gateway
        .restaurant_reviews(RestaurantId::new(1))
        .await
        .unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].comment, "Great carbonara");
}

#[tokio::test]
async fn health_reports_ok() {
    let (_backend, gateway) = setup().await;
    let health = gateway.health().await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn transport_failure_uses_the_endpoint_default_message() {
    // Point at a port nothing listens on.
    let config = ClientConfig::with_base_url("http://127.0.0.1:9/api").unwrap();
    let gateway = Gateway::new(&config, Arc::new(MemoryCredentialStore::new()) as _);

    let error = gateway
        .list_restaurants(&RestaurantQuery::default())
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "Failed to fetch restaurants");
    assert_eq!(error.status(), None);
}
