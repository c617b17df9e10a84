use actix_web::{http::StatusCode, test::TestRequest};
use pos_engine::StorageError;

use super::{
    helpers::{json, orders_api, send_request, unused_directory},
    mocks::{MockGateway, MockStore},
};

fn store_with_ping(result: Result<(), StorageError>) -> MockStore {
    let mut store = MockStore::new();
    store.expect_ping().times(1).return_once(move || result);
    store
}

#[actix_web::test]
async fn liveness_needs_no_token_or_database() {
    let mut store = MockStore::new();
    store.expect_ping().never();
    let req = TestRequest::get().uri("/livez");
    let (status, body) = send_request(req, unused_directory(), orders_api(store, MockGateway::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[actix_web::test]
async fn ready_while_the_database_answers() {
    let req = TestRequest::get().uri("/readyz");
    let orders = orders_api(store_with_ping(Ok(())), MockGateway::new());
    let (status, body) = send_request(req, unused_directory(), orders).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[actix_web::test]
async fn not_ready_when_the_database_is_down() {
    let req = TestRequest::get().uri("/readyz");
    let down = StorageError::DatabaseError("pool closed".to_string());
    let orders = orders_api(store_with_ping(Err(down)), MockGateway::new());
    let (status, body) = send_request(req, unused_directory(), orders).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json(&body)["error"].as_str().unwrap().contains("pool closed"));
}

#[actix_web::test]
async fn metrics_need_no_token() {
    let req = TestRequest::get().uri("/metrics");
    let (status, _) = send_request(req, unused_directory(), orders_api(MockStore::new(), MockGateway::new())).await;
    assert_eq!(status, StatusCode::OK);
}
