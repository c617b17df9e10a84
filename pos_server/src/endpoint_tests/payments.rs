use actix_web::{http::StatusCode, test::TestRequest};
use pos_common::Money;
use pos_engine::{traits::RemotePaymentResult, GatewayError, StorageError};

use super::{
    helpers::{burger_order, json, known_merchant, orders_api, send_request, TOKEN},
    mocks::{MockGateway, MockStore},
};

fn pay_request(order_id: &str, body: &str) -> TestRequest {
    TestRequest::post()
        .uri(&format!("/v1/orders/{order_id}/pay"))
        .insert_header(("Authorization", TOKEN))
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string())
}

fn confirmed(bill: Money, tip: Money) -> RemotePaymentResult {
    RemotePaymentResult { payment_id: "sq-pay-1".to_string(), status: "COMPLETED".to_string(), amount: bill, tip }
}

fn store_with_burger_order() -> MockStore {
    let mut store = MockStore::new();
    store.expect_fetch_order().returning(|_, id| Ok(Some(burger_order(id))));
    store
}

#[actix_web::test]
async fn full_payment() {
    let mut gateway = MockGateway::new();
    gateway.expect_create_remote_payment().times(1).returning(|_, location_id, order_id, bill, tip, key| {
        assert_eq!(location_id, "L1");
        assert_eq!(order_id, "sq-1");
        assert_eq!(key, "p1");
        Ok(confirmed(bill, tip))
    });
    let mut store = store_with_burger_order();
    store
        .expect_record_payment()
        .withf(|_, paid, tips| *paid == Money::from(2000) && *tips == Money::from(300))
        .times(1)
        .returning(|id, paid, tips| {
            let mut order = burger_order(id);
            order.totals.paid = paid;
            order.totals.tips = tips;
            order.is_closed = true;
            Ok(order)
        });
    let req = pay_request("sq-1", r#"{"billAmount": 2000, "tipAmount": 300, "paymentId": "p1"}"#);
    let (status, body) = send_request(req, known_merchant(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(json(&body), serde_json::json!({"status": "Payment processed successfully"}));
}

#[actix_web::test]
async fn the_ledger_records_confirmed_amounts() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_remote_payment()
        .times(1)
        .returning(|_, _, _, _, _, _| Ok(confirmed(Money::from(1500), Money::zero())));
    let mut store = store_with_burger_order();
    store
        .expect_record_payment()
        .withf(|_, paid, tips| *paid == Money::from(1500) && *tips == Money::zero())
        .times(1)
        .returning(|id, _, _| Ok(burger_order(id)));
    let req = pay_request("sq-1", r#"{"billAmount": 1600, "paymentId": "p1"}"#);
    let (status, _) = send_request(req, known_merchant(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn paying_an_unknown_order_is_not_found() {
    let mut gateway = MockGateway::new();
    gateway.expect_create_remote_payment().never();
    let mut store = MockStore::new();
    store.expect_fetch_order().times(1).returning(|_, _| Ok(None));
    store.expect_record_payment().never();
    let req = pay_request("someone-elses", r#"{"billAmount": 2000, "tipAmount": 0, "paymentId": "p1"}"#);
    let (status, _) = send_request(req, known_merchant(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_payments_are_bad_requests() {
    let bodies = [
        r#"{"billAmount": 2000}"#,
        r#"{"billAmount": "lots", "paymentId": "p1"}"#,
        r#"{"billAmount": 0, "tipAmount": 0, "paymentId": "p1"}"#,
        r#"{"billAmount": -5, "tipAmount": 0, "paymentId": "p1"}"#,
        r#"{"billAmount": 2000, "tipAmount": 0, "paymentId": ""}"#,
    ];
    for body in bodies {
        let mut gateway = MockGateway::new();
        gateway.expect_create_remote_payment().never();
        let mut store = store_with_burger_order();
        store.expect_record_payment().never();
        let (status, _) = send_request(pay_request("sq-1", body), known_merchant(), orders_api(store, gateway)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }
}

#[actix_web::test]
async fn gateway_failure_leaves_the_ledger_alone() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_remote_payment()
        .times(1)
        .returning(|_, _, _, _, _, _| Err(GatewayError::Rejected("CARD_DECLINED".to_string())));
    let mut store = store_with_burger_order();
    store.expect_record_payment().never();
    let req = pay_request("sq-1", r#"{"billAmount": 2000, "tipAmount": 300, "paymentId": "p1"}"#);
    let (status, body) = send_request(req, known_merchant(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json(&body)["error"].as_str().unwrap().contains("CARD_DECLINED"));
}

#[actix_web::test]
async fn unrecorded_payments_are_reported() {
    let mut gateway = MockGateway::new();
    gateway.expect_create_remote_payment().times(1).returning(|_, _, _, bill, tip, _| Ok(confirmed(bill, tip)));
    let mut store = store_with_burger_order();
    store
        .expect_record_payment()
        .times(1)
        .returning(|_, _, _| Err(StorageError::DatabaseError("disk I/O error".to_string())));
    let req = pay_request("sq-1", r#"{"billAmount": 2000, "tipAmount": 300, "paymentId": "p1"}"#);
    let (status, body) = send_request(req, known_merchant(), orders_api(store, gateway)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = json(&body)["error"].as_str().unwrap().to_string();
    assert!(message.contains("could not be recorded"), "{message}");
    assert!(message.contains("p1"), "{message}");
}
