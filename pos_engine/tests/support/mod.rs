#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use log::*;
use pos_common::{Money, Secret};
use pos_engine::{
    order_objects::NewOrderItem,
    traits::{MerchantIdentity, RemoteLineItem, RemoteOrderResult, RemoteOrderState, RemotePaymentResult, RemoteTotals},
    GatewayError,
    OrderFlowApi,
    PaymentsGateway,
    RestaurantApi,
    SqliteDatabase,
};

/// Creates a fresh, migrated database in the temp directory.
pub async fn prepare_test_db() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let path = std::env::temp_dir().join(format!("pos_test_store_{}.db", rand::random::<u64>()));
    let url = format!("sqlite://{}", path.display());
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    debug!("🚀️ Test database ready at {url}");
    db
}

pub struct TestEnv {
    pub db: SqliteDatabase,
    pub gateway: FakeGateway,
    pub directory: RestaurantApi<SqliteDatabase, FakeGateway>,
    pub orders: OrderFlowApi<SqliteDatabase, FakeGateway>,
}

pub async fn prepare_env() -> TestEnv {
    let db = prepare_test_db().await;
    let gateway = FakeGateway::default();
    let directory = RestaurantApi::new(db.clone(), gateway.clone());
    let orders = OrderFlowApi::new(db.clone(), gateway.clone());
    TestEnv { db, gateway, directory, orders }
}

pub fn token(s: &str) -> Secret<String> {
    Secret::new(s.to_string())
}

#[derive(Debug, Clone)]
pub struct PaymentCall {
    pub order_id: String,
    pub bill_amount: Money,
    pub tip_amount: Money,
    pub idempotency_key: String,
}

#[derive(Debug, Default)]
struct FakeState {
    fail_orders: bool,
    fail_payments: bool,
    /// When set, every remote order gets this id
    fixed_order_id: Option<String>,
    order_count: u64,
    order_calls: u64,
    payment_calls: Vec<PaymentCall>,
}

/// An in-memory stand-in for the payments platform.
///
/// * Tokens starting with `revoked` are unknown to the platform.
/// * Tokens starting with `nolocation` belong to merchants without locations.
/// * Any other token `t` belongs to merchant `M-t`, whose only location is `L-t`.
///
/// Orders are priced the way the platform prices them: line totals include modifiers and subtract discounts, and
/// the amount due is the sum of the line totals.
#[derive(Debug, Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<FakeState>>,
}

impl FakeGateway {
    pub fn fail_orders(&self, fail: bool) {
        self.state.lock().unwrap().fail_orders = fail;
    }

    pub fn fail_payments(&self, fail: bool) {
        self.state.lock().unwrap().fail_payments = fail;
    }

    pub fn use_fixed_order_id(&self, id: &str) {
        self.state.lock().unwrap().fixed_order_id = Some(id.to_string());
    }

    pub fn order_calls(&self) -> u64 {
        self.state.lock().unwrap().order_calls
    }

    pub fn payment_calls(&self) -> Vec<PaymentCall> {
        self.state.lock().unwrap().payment_calls.clone()
    }
}

fn price_line(item: &NewOrderItem) -> RemoteLineItem {
    let base = item.unit_price * item.quantity;
    let modifier_amounts: Vec<Money> = item.modifiers.iter().map(|m| m.unit_price * m.quantity * item.quantity).collect();
    let gross = base + modifier_amounts.iter().copied().sum::<Money>();
    let discount_amounts: Vec<Money> = item
        .discounts
        .iter()
        .map(|d| {
            if d.is_percentage {
                #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
                Money::from((gross.value() as f64 * d.value / 100.0).round() as i64)
            } else {
                Money::from_major_units(d.value).unwrap()
            }
        })
        .collect();
    let amount = gross - discount_amounts.iter().copied().sum::<Money>();
    RemoteLineItem { amount, discount_amounts, modifier_amounts }
}

impl PaymentsGateway for FakeGateway {
    async fn resolve_merchant(&self, token: &Secret<String>) -> Result<MerchantIdentity, GatewayError> {
        let t = token.reveal();
        if t.starts_with("revoked") {
            return Err(GatewayError::Rejected("UNAUTHORIZED: token revoked".to_string()));
        }
        let location_ids = if t.starts_with("nolocation") { vec![] } else { vec![format!("L-{t}")] };
        Ok(MerchantIdentity { merchant_id: format!("M-{t}"), location_ids })
    }

    async fn create_remote_order(
        &self,
        _token: &Secret<String>,
        _location_id: &str,
        items: &[NewOrderItem],
    ) -> Result<RemoteOrderResult, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.order_calls += 1;
        if state.fail_orders {
            return Err(GatewayError::Unavailable("connection reset".to_string()));
        }
        state.order_count += 1;
        let order_id = state.fixed_order_id.clone().unwrap_or_else(|| format!("sq-order-{}", state.order_count));
        let line_items: Vec<RemoteLineItem> = items.iter().map(price_line).collect();
        let total = line_items.iter().map(|l| l.amount).sum::<Money>();
        let discounts = line_items.iter().flat_map(|l| l.discount_amounts.iter().copied()).sum::<Money>();
        let totals = RemoteTotals { discounts, due: total, total, ..Default::default() };
        Ok(RemoteOrderResult { order_id, state: RemoteOrderState::Open, totals, line_items })
    }

    async fn create_remote_payment(
        &self,
        _token: &Secret<String>,
        _location_id: &str,
        order_id: &str,
        bill_amount: Money,
        tip_amount: Money,
        idempotency_key: &str,
    ) -> Result<RemotePaymentResult, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.payment_calls.push(PaymentCall {
            order_id: order_id.to_string(),
            bill_amount,
            tip_amount,
            idempotency_key: idempotency_key.to_string(),
        });
        if state.fail_payments {
            return Err(GatewayError::Rejected("CARD_DECLINED".to_string()));
        }
        Ok(RemotePaymentResult {
            payment_id: format!("sq-pay-{idempotency_key}"),
            status: "COMPLETED".to_string(),
            amount: bill_amount,
            tip: tip_amount,
        })
    }
}
