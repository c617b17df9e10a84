use actix_web::{http::StatusCode, test::TestRequest};

use super::{
    helpers::{burger_order, json, known_merchant, orders_api, revoked_merchant, send_request, unused_directory, TOKEN},
    mocks::{MockGateway, MockStore},
};

fn untouched_orders() -> (MockStore, MockGateway) {
    let mut store = MockStore::new();
    store.expect_fetch_order().never();
    store.expect_fetch_orders_for_table().never();
    let mut gateway = MockGateway::new();
    gateway.expect_create_remote_order().never();
    (store, gateway)
}

#[actix_web::test]
async fn health_check_needs_no_token() {
    let (store, gateway) = untouched_orders();
    let req = TestRequest::get().uri("/health");
    let (status, body) = send_request(req, unused_directory(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn missing_token_is_unauthorized() {
    let (store, gateway) = untouched_orders();
    let req = TestRequest::get().uri("/v1/orders/table/5");
    let (status, body) = send_request(req, unused_directory(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json(&body)["error"], "Authentication Error. An access token is required");
}

#[actix_web::test]
async fn blank_token_is_unauthorized() {
    let (store, gateway) = untouched_orders();
    let req = TestRequest::post().uri("/v1/orders").insert_header(("Authorization", "   "));
    let (status, _) = send_request(req, unused_directory(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn revoked_token_is_unauthorized() {
    let (store, gateway) = untouched_orders();
    let req = TestRequest::get().uri("/v1/orders/sq-1").insert_header(("Authorization", TOKEN));
    let (status, body) = send_request(req, revoked_merchant(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json(&body)["error"].as_str().unwrap().contains("UNAUTHORIZED"));
}

#[actix_web::test]
async fn bearer_and_bare_tokens_are_both_accepted() {
    for header in [format!("Bearer {TOKEN}"), TOKEN.to_string()] {
        let mut store = MockStore::new();
        store.expect_fetch_order().times(1).returning(|_, id| Ok(Some(burger_order(id))));
        let req = TestRequest::get().uri("/v1/orders/sq-1").insert_header(("Authorization", header));
        let (status, _) = send_request(req, known_merchant(), orders_api(store, MockGateway::new())).await;
        assert_eq!(status, StatusCode::OK);
    }
}
