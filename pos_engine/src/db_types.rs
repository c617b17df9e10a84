//! Records persisted by the engine.
//!
//! Every monetary field is a [`Money`] in minor units. Orders are identified by the id the payments platform issued
//! when the order was created there; every other record uses a local integer id.
use chrono::{DateTime, Utc};
use pos_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

//--------------------------------------     Restaurant       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    #[serde(skip)]
    pub auth_token_hash: String,
    pub location_id: String,
    pub merchant_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub auth_token_hash: String,
    pub location_id: String,
    pub merchant_id: String,
}

impl NewRestaurant {
    pub fn new(auth_token_hash: String, merchant_id: String, location_id: String) -> Self {
        let name = format!("Restaurant-{merchant_id}");
        Self { name, auth_token_hash, location_id, merchant_id }
    }
}

//--------------------------------------       Order          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// The id issued by the payments platform
    pub id: String,
    pub restaurant_id: i64,
    pub table_number: String,
    pub is_closed: bool,
    /// The platform's state for the order at the time it was created, e.g. `OPEN`
    pub remote_state: String,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    #[sqlx(skip)]
    pub items: Vec<OrderItem>,
    #[sqlx(skip)]
    pub totals: OrderTotals,
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: String,
    /// Zero-based position of the item in the order as submitted
    pub position: i64,
    pub name: String,
    pub comment: Option<String>,
    pub unit_price: Money,
    pub quantity: i64,
    /// Line total as computed by the payments platform, with discounts and modifiers applied
    pub amount: Money,
    #[sqlx(skip)]
    pub discounts: Vec<Discount>,
    #[sqlx(skip)]
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: i64,
    pub order_item_id: i64,
    pub name: String,
    pub is_percentage: bool,
    /// A percentage when `is_percentage` is set, otherwise an amount in major units
    pub value: f64,
    /// The amount this discount took off its line
    pub amount: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    pub id: i64,
    pub order_item_id: i64,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub amount: Money,
}

/// The monetary breakdown of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub order_id: String,
    pub discounts: Money,
    pub due: Money,
    pub tax: Money,
    pub service_charge: Money,
    pub paid: Money,
    pub tips: Money,
    pub total: Money,
}
