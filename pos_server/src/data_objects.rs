//! Request and response bodies for the `/v1` routes.
//!
//! Amounts on order requests are in major units (`10.50`), as typed in by front-of-house staff. Payment amounts are
//! in minor units (`1050`), as reported by the card reader. Everything is converted to [`Money`] before it reaches the
//! engine.
use std::fmt::Display;

use pos_common::Money;
use pos_engine::order_objects::{NewDiscount, NewModifier, NewOrder, NewOrderItem, PaymentRequest};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ServerError;

pub const PAYMENT_SUCCESS_MESSAGE: &str = "Payment processed successfully";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub table_number: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub unit_price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub discounts: Vec<DiscountRequest>,
    #[serde(default)]
    pub modifiers: Vec<ModifierRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRequest {
    pub name: String,
    #[serde(default)]
    pub is_percentage: bool,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierRequest {
    pub name: String,
    pub unit_price: f64,
    #[serde(default = "one")]
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayOrderRequest {
    pub bill_amount: i64,
    #[serde(default)]
    pub tip_amount: i64,
    pub payment_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new<S: Display>(status: S) -> Self {
        Self { status: status.to_string() }
    }
}

fn one() -> i64 {
    1
}

/// Table numbers are labels, but some clients send them as JSON numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(i64),
    }
    match Label::deserialize(deserializer)? {
        Label::Text(s) => Ok(s),
        Label::Number(n) => Ok(n.to_string()),
    }
}

fn price(field: &str, amount: f64) -> Result<Money, ServerError> {
    Money::from_major_units(amount).map_err(|e| ServerError::InvalidRequestBody(format!("{field}: {e}")))
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = ServerError;

    fn try_from(value: CreateOrderRequest) -> Result<Self, Self::Error> {
        let items = value.items.into_iter().map(NewOrderItem::try_from).collect::<Result<Vec<_>, _>>()?;
        Ok(NewOrder { table_number: value.table_number, items })
    }
}

impl TryFrom<OrderItemRequest> for NewOrderItem {
    type Error = ServerError;

    fn try_from(value: OrderItemRequest) -> Result<Self, Self::Error> {
        let unit_price = price("unitPrice", value.unit_price)?;
        let discounts = value
            .discounts
            .into_iter()
            .map(|d| NewDiscount { name: d.name, is_percentage: d.is_percentage, value: d.value })
            .collect();
        let modifiers = value
            .modifiers
            .into_iter()
            .map(|m| {
                let unit_price = price("modifier unitPrice", m.unit_price)?;
                Ok(NewModifier { name: m.name, unit_price, quantity: m.quantity })
            })
            .collect::<Result<Vec<_>, ServerError>>()?;
        let comment = value.comment.filter(|c| !c.trim().is_empty());
        Ok(NewOrderItem { name: value.name, comment, unit_price, quantity: value.quantity, discounts, modifiers })
    }
}

impl From<PayOrderRequest> for PaymentRequest {
    fn from(value: PayOrderRequest) -> Self {
        PaymentRequest::new(Money::from(value.bill_amount), Money::from(value.tip_amount), value.payment_id)
    }
}
