use pos_common::Money;
use serde::{Deserialize, Serialize};

use crate::data_objects::SquareMoney;

/// The `source_id` Square uses to record a cash tender against an order.
pub const CASH_SOURCE_ID: &str = "CASH";

#[derive(Debug, Clone, Serialize)]
pub struct CashPaymentDetails {
    pub buyer_supplied_money: SquareMoney,
}

/// Body of `POST /v2/payments`
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentRequest {
    pub idempotency_key: String,
    pub source_id: String,
    pub order_id: String,
    pub location_id: String,
    pub amount_money: SquareMoney,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip_money: Option<SquareMoney>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_details: Option<CashPaymentDetails>,
}

impl CreatePaymentRequest {
    /// A cash payment of `bill` plus `tip` against a remote order. The buyer is recorded as having handed over
    /// exactly the combined amount, so no change is due. Returns `None` if that amount overflows.
    pub fn cash(
        idempotency_key: String,
        location_id: String,
        order_id: String,
        bill: Money,
        tip: Money,
        currency: &str,
    ) -> Option<Self> {
        let buyer_supplied = bill.checked_add(tip)?;
        let tip_money = (tip > Money::zero()).then(|| SquareMoney::new(tip, currency));
        Some(Self {
            idempotency_key,
            source_id: CASH_SOURCE_ID.to_string(),
            order_id,
            location_id,
            amount_money: SquareMoney::new(bill, currency),
            tip_money,
            cash_details: Some(CashPaymentDetails { buyer_supplied_money: SquareMoney::new(buyer_supplied, currency) }),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SquarePayment {
    pub id: String,
    #[serde(default)]
    pub status: String,
    pub order_id: Option<String>,
    pub amount_money: Option<SquareMoney>,
    pub tip_money: Option<SquareMoney>,
    pub total_money: Option<SquareMoney>,
}
