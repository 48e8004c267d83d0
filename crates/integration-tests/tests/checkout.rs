//! Checkout flows: placing orders, the terms checkbox and the empty cart guard.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use demo_shop_integration_tests::TestClient;

const BILLING: [(&str, &str); 9] = [
    ("firstname", "John"),
    ("lastname", "Doe"),
    ("email", "john.doe@example.com"),
    ("telephone", "1234567890"),
    ("address", "123 Test Street"),
    ("city", "Test City"),
    ("postcode", "12345"),
    ("country", "United States"),
    ("zone", "California"),
];

fn billing_with_terms() -> Vec<(&'static str, &'static str)> {
    let mut fields = BILLING.to_vec();
    fields.push(("agree", "on"));
    fields
}

#[tokio::test]
async fn test_checkout_page_shows_order_summary() {
    let mut client = TestClient::new();
    client.add_to_cart("Headphones").await;

    let page = client.get("/checkout").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(r#"id="checkout-form""#));
    assert!(page.body.contains("1 x Headphones"));
    assert!(page.body.contains("Total: $199.99"));
}

#[tokio::test]
async fn test_place_order_with_terms() {
    let mut client = TestClient::new();
    client.add_to_cart("MacBook").await;
    client.add_to_cart("Mouse").await;

    let response = client.post_form("/checkout", &billing_with_terms()).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let location = response.location.clone().unwrap();
    assert!(location.starts_with("/success?order=ORD-"), "{location}");

    let success = client.follow(&response).await;
    assert_eq!(success.status, StatusCode::OK);
    assert!(success.body.contains("Your order has been placed!"));
    assert!(success.body.contains(r#"<strong id="order-id">ORD-"#));

    assert_eq!(client.cart_count().await, 0);
}

#[tokio::test]
async fn test_success_page_falls_back_to_last_order() {
    let mut client = TestClient::new();
    client.add_to_cart("Mouse").await;
    let response = client.post_form("/checkout", &billing_with_terms()).await;
    let location = response.location.unwrap();
    let order_id = location.trim_start_matches("/success?order=");

    let success = client.get("/success").await;

    assert!(success.body.contains(order_id));
}

#[tokio::test]
async fn test_checkout_without_terms_keeps_cart() {
    let mut client = TestClient::new();
    client.add_to_cart("MacBook").await;

    let response = client.post_form("/checkout", &BILLING).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        response
            .body
            .contains("Please accept the Terms and Conditions to proceed.")
    );
    // Entered values survive the round trip.
    assert!(response.body.contains(r#"name="firstname" value="John""#));
    assert!(response.body.contains("Test City"));

    assert_eq!(client.cart_count().await, 1);
}

#[tokio::test]
async fn test_checkout_with_empty_cart() {
    let mut client = TestClient::new();

    let response = client.post_form("/checkout", &billing_with_terms()).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/cart"));

    let cart = client.follow(&response).await;
    assert!(cart.body.contains("Your cart is empty!"));
}

#[tokio::test]
async fn test_checkout_prefills_logged_in_email() {
    let mut client = TestClient::new();
    client
        .post_form(
            "/login",
            &[("email", "test@example.com"), ("password", "test123")],
        )
        .await;
    client.add_to_cart("Monitor").await;

    let page = client.get("/checkout").await;

    assert!(page.body.contains(r#"name="email" value="test@example.com""#));
}

#[tokio::test]
async fn test_account_shows_last_order() {
    let mut client = TestClient::new();
    client
        .post_form(
            "/login",
            &[("email", "test@example.com"), ("password", "test123")],
        )
        .await;
    client.add_to_cart("Monitor").await;
    client.post_form("/checkout", &billing_with_terms()).await;

    let account = client.get("/account").await;

    assert!(account.body.contains("Last order: <strong>ORD-"));
}
