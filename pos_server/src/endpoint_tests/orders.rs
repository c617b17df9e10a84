use actix_web::{http::StatusCode, test::TestRequest};
use pos_common::Money;
use pos_engine::{
    traits::{RemoteLineItem, RemoteOrderResult, RemoteOrderState, RemoteTotals},
    GatewayError,
    StorageError,
};
use serde_json::json as json_body;

use super::{
    helpers::{burger_order, json, known_merchant, orders_api, send_request, TOKEN},
    mocks::{MockGateway, MockStore},
};

const BURGER_ORDER: &str = r#"{"tableNumber": "5", "items": [{"name": "Burger", "unitPrice": 10.00, "quantity": 2}]}"#;

fn remote_burger_order() -> RemoteOrderResult {
    RemoteOrderResult {
        order_id: "sq-1".to_string(),
        state: RemoteOrderState::Open,
        totals: RemoteTotals { due: Money::from(2000), total: Money::from(2000), ..Default::default() },
        line_items: vec![RemoteLineItem { amount: Money::from(2000), ..Default::default() }],
    }
}

fn create_request(body: &str) -> TestRequest {
    TestRequest::post()
        .uri("/v1/orders")
        .insert_header(("Authorization", format!("Bearer {TOKEN}")))
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string())
}

fn gateway_never_called() -> MockGateway {
    let mut gateway = MockGateway::new();
    gateway.expect_create_remote_order().never();
    gateway.expect_create_remote_payment().never();
    gateway
}

#[actix_web::test]
async fn create_order() {
    let mut gateway = MockGateway::new();
    gateway.expect_create_remote_order().times(1).returning(|token, location_id, items| {
        assert_eq!(token.reveal(), TOKEN);
        assert_eq!(location_id, "L1");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price, Money::from(1000));
        assert_eq!(items[0].quantity, 2);
        Ok(remote_burger_order())
    });
    let mut store = MockStore::new();
    store.expect_insert_order().times(1).returning(|order| Ok(order.clone()));

    let (status, body) = send_request(create_request(BURGER_ORDER), known_merchant(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let order = json(&body);
    assert_eq!(order["id"], "sq-1");
    assert_eq!(order["restaurantId"], 1);
    assert_eq!(order["tableNumber"], "5");
    assert_eq!(order["isClosed"], false);
    assert!(order["closedAt"].is_null());
    assert_eq!(order["totals"]["due"], 2000);
    assert_eq!(order["totals"]["paid"], 0);
    assert_eq!(order["items"][0]["name"], "Burger");
    assert_eq!(order["items"][0]["amount"], 2000);
}

#[actix_web::test]
async fn malformed_order_bodies_are_bad_requests() {
    for body in ["{not json", r#"{"tableNumber": "5"}"#, r#"{"tableNumber": "5", "items": [{"name": "Burger"}]}"#] {
        let (status, response) =
            send_request(create_request(body), known_merchant(), orders_api(MockStore::new(), gateway_never_called()))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(json(&response)["error"].as_str().unwrap().starts_with("Could not read request body"));
    }
}

#[actix_web::test]
async fn invalid_orders_are_bad_requests() {
    let bodies = [
        json_body!({"tableNumber": "5", "items": []}),
        json_body!({"tableNumber": " ", "items": [{"name": "Burger", "unitPrice": 10, "quantity": 1}]}),
        json_body!({"tableNumber": "5", "items": [{"name": "Burger", "unitPrice": 10, "quantity": 0}]}),
        json_body!({"tableNumber": "5", "items": [{"name": "Burger", "unitPrice": -1, "quantity": 1}]}),
        json_body!({"tableNumber": "5", "items": [{
            "name": "Burger", "unitPrice": 10, "quantity": 1,
            "discounts": [{"name": "Free", "isPercentage": true, "value": 150}]
        }]}),
    ];
    for body in bodies {
        let body = body.to_string();
        let (status, _) =
            send_request(create_request(&body), known_merchant(), orders_api(MockStore::new(), gateway_never_called()))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }
}

#[actix_web::test]
async fn gateway_failure_on_create_is_a_server_error() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_remote_order()
        .times(1)
        .returning(|_, _, _| Err(GatewayError::Unavailable("connection reset".to_string())));
    let mut store = MockStore::new();
    store.expect_insert_order().never();
    let (status, body) = send_request(create_request(BURGER_ORDER), known_merchant(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json(&body)["error"].as_str().unwrap().contains("connection reset"));
}

#[actix_web::test]
async fn storage_failure_after_remote_creation_names_the_remote_order() {
    let mut gateway = MockGateway::new();
    gateway.expect_create_remote_order().times(1).returning(|_, _, _| Ok(remote_burger_order()));
    let mut store = MockStore::new();
    store
        .expect_insert_order()
        .times(1)
        .returning(|_| Err(StorageError::DatabaseError("database is locked".to_string())));
    let (status, body) = send_request(create_request(BURGER_ORDER), known_merchant(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = json(&body)["error"].as_str().unwrap().to_string();
    assert!(message.contains("sq-1"), "{message}");
    assert!(message.contains("could not be saved"), "{message}");
}

#[actix_web::test]
async fn fetch_order_by_id() {
    let mut store = MockStore::new();
    store.expect_fetch_order().times(1).returning(|restaurant_id, id| {
        assert_eq!(restaurant_id, 1);
        Ok(Some(burger_order(id)))
    });
    let req = TestRequest::get().uri("/v1/orders/sq-1").insert_header(("Authorization", TOKEN));
    let (status, body) = send_request(req, known_merchant(), orders_api(store, gateway_never_called())).await;
    assert_eq!(status, StatusCode::OK);
    let order = json(&body);
    assert_eq!(order["id"], "sq-1");
    assert_eq!(order["items"][0]["unitPrice"], 1000);
}

#[actix_web::test]
async fn unknown_orders_are_not_found() {
    let mut store = MockStore::new();
    store.expect_fetch_order().times(1).returning(|_, _| Ok(None));
    let req = TestRequest::get().uri("/v1/orders/someone-elses").insert_header(("Authorization", TOKEN));
    let (status, body) = send_request(req, known_merchant(), orders_api(store, gateway_never_called())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body)["error"], "The data was not found. Order someone-elses does not exist");
}

#[actix_web::test]
async fn orders_for_table() {
    let mut store = MockStore::new();
    store.expect_fetch_orders_for_table().times(1).returning(|_, table| {
        assert_eq!(table, "5");
        Ok(vec![burger_order("sq-1"), burger_order("sq-2")])
    });
    let req = TestRequest::get().uri("/v1/orders/table/5").insert_header(("Authorization", TOKEN));
    let (status, body) = send_request(req, known_merchant(), orders_api(store, gateway_never_called())).await;
    assert_eq!(status, StatusCode::OK);
    let orders = json(&body);
    assert_eq!(orders.as_array().unwrap().len(), 2);
    assert_eq!(orders[1]["id"], "sq-2");
}

#[actix_web::test]
async fn empty_tables_have_no_orders() {
    let mut store = MockStore::new();
    store.expect_fetch_orders_for_table().times(1).returning(|_, _| Ok(vec![]));
    let req = TestRequest::get().uri("/v1/orders/table/99").insert_header(("Authorization", TOKEN));
    let (status, body) = send_request(req, known_merchant(), orders_api(store, gateway_never_called())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}
