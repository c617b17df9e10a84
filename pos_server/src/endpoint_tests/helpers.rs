use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, App};
use chrono::{TimeZone, Utc};
use log::debug;
use metrics_exporter_prometheus::PrometheusBuilder;
use pos_common::Money;
use pos_engine::{
    db_types::{Order, OrderItem, OrderTotals, Restaurant},
    traits::MerchantIdentity,
    GatewayError,
    OrderFlowApi,
    RestaurantApi,
};

use super::mocks::{MockGateway, MockStore};
use crate::server::configure_routes;

pub const TOKEN: &str = "EAAA-test-token";

pub type Directory = RestaurantApi<MockStore, MockGateway>;
pub type Orders = OrderFlowApi<MockStore, MockGateway>;

pub fn restaurant() -> Restaurant {
    Restaurant {
        id: 1,
        name: "Restaurant-M1".to_string(),
        auth_token_hash: "digest".to_string(),
        location_id: "L1".to_string(),
        merchant_id: "M1".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap(),
    }
}

/// A directory in which every token belongs to restaurant #1.
pub fn known_merchant() -> Directory {
    let mut store = MockStore::new();
    store.expect_fetch_restaurant_by_token_hash().returning(|_| Ok(Some(restaurant())));
    store.expect_fetch_or_create_restaurant().never();
    let mut gateway = MockGateway::new();
    gateway
        .expect_resolve_merchant()
        .returning(|_| Ok(MerchantIdentity { merchant_id: "M1".to_string(), location_ids: vec!["L1".to_string()] }));
    RestaurantApi::new(store, gateway)
}

/// A directory whose payments platform rejects every token.
pub fn revoked_merchant() -> Directory {
    let mut store = MockStore::new();
    store.expect_fetch_restaurant_by_token_hash().never();
    let mut gateway = MockGateway::new();
    gateway.expect_resolve_merchant().returning(|_| Err(GatewayError::Rejected("UNAUTHORIZED".to_string())));
    RestaurantApi::new(store, gateway)
}

/// A directory that must never be consulted.
pub fn unused_directory() -> Directory {
    let mut gateway = MockGateway::new();
    gateway.expect_resolve_merchant().never();
    RestaurantApi::new(MockStore::new(), gateway)
}

pub fn orders_api(store: MockStore, gateway: MockGateway) -> Orders {
    OrderFlowApi::new(store, gateway)
}

/// Table 5: Burger 10.00 x 2, nothing paid yet.
pub fn burger_order(id: &str) -> Order {
    let item = OrderItem {
        id: 1,
        order_id: id.to_string(),
        position: 0,
        name: "Burger".to_string(),
        comment: None,
        unit_price: Money::from(1000),
        quantity: 2,
        amount: Money::from(2000),
        discounts: vec![],
        modifiers: vec![],
    };
    let totals =
        OrderTotals { order_id: id.to_string(), due: Money::from(2000), total: Money::from(2000), ..Default::default() };
    Order {
        id: id.to_string(),
        restaurant_id: 1,
        table_number: "5".to_string(),
        is_closed: false,
        remote_state: "OPEN".to_string(),
        opened_at: Utc.with_ymd_and_hms(2024, 8, 1, 18, 30, 0).unwrap(),
        closed_at: None,
        items: vec![item],
        totals,
    }
}

/// Runs a single request against an app with every route configured. Errors raised by middleware are rendered the
/// way the HTTP server would render them.
pub async fn send_request(req: TestRequest, directory: Directory, orders: Orders) -> (StatusCode, String) {
    let _ = env_logger::try_init();
    let app = App::new()
        .app_data(web::Data::new(directory))
        .app_data(web::Data::new(orders))
        .app_data(web::Data::new(PrometheusBuilder::new().build_recorder().handle()))
        .configure(configure_routes::<MockStore, MockGateway>);
    let service = test::init_service(app).await;
    let res = match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => res.into_parts().1.map_into_boxed_body(),
        Err(e) => {
            debug!("Request failed in middleware: {e}");
            e.error_response()
        },
    };
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("Response is not JSON ({e}): {body}"))
}
