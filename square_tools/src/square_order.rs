use pos_common::Money;
use serde::{Deserialize, Serialize};

use crate::data_objects::{money_or_zero, SquareMoney};

//--------------------------------------    Order requests    --------------------------------------------------------

/// Body of `POST /v2/orders`
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub idempotency_key: String,
    pub order: NewSquareOrder,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSquareOrder {
    pub location_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    pub line_items: Vec<NewLineItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<NewOrderDiscount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewLineItem {
    pub name: String,
    /// Square expects quantities as decimal strings
    pub quantity: String,
    pub base_price_money: SquareMoney,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<NewLineItemModifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub applied_discounts: Vec<AppliedDiscountRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewLineItemModifier {
    pub name: String,
    pub base_price_money: SquareMoney,
    pub quantity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    FixedPercentage,
    FixedAmount,
}

/// An order-level discount definition. With `scope = LINE_ITEM` it only applies to line items that reference its
/// `uid` in their `applied_discounts`.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderDiscount {
    pub uid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_money: Option<SquareMoney>,
    pub scope: String,
}

impl NewOrderDiscount {
    pub fn percentage(uid: String, name: String, percentage: f64) -> Self {
        Self {
            uid,
            name,
            discount_type: DiscountType::FixedPercentage,
            percentage: Some(format_percentage(percentage)),
            amount_money: None,
            scope: "LINE_ITEM".to_string(),
        }
    }

    pub fn fixed_amount(uid: String, name: String, amount: SquareMoney) -> Self {
        Self {
            uid,
            name,
            discount_type: DiscountType::FixedAmount,
            percentage: None,
            amount_money: Some(amount),
            scope: "LINE_ITEM".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppliedDiscountRef {
    pub discount_uid: String,
}

/// Square accepts percentages as strings with up to 4 decimal places
fn format_percentage(p: f64) -> String {
    let s = format!("{p:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

//--------------------------------------    Order responses   --------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    #[default]
    Open,
    Completed,
    Canceled,
    Draft,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SquareOrder {
    pub id: String,
    #[serde(default)]
    pub location_id: String,
    #[serde(default)]
    pub state: OrderState,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub total_money: Option<SquareMoney>,
    pub total_tax_money: Option<SquareMoney>,
    pub total_discount_money: Option<SquareMoney>,
    pub total_tip_money: Option<SquareMoney>,
    pub total_service_charge_money: Option<SquareMoney>,
    pub net_amount_due_money: Option<SquareMoney>,
}

impl SquareOrder {
    pub fn total(&self) -> Money {
        money_or_zero(self.total_money.as_ref())
    }

    pub fn total_tax(&self) -> Money {
        money_or_zero(self.total_tax_money.as_ref())
    }

    pub fn total_discount(&self) -> Money {
        money_or_zero(self.total_discount_money.as_ref())
    }

    pub fn total_tip(&self) -> Money {
        money_or_zero(self.total_tip_money.as_ref())
    }

    pub fn total_service_charge(&self) -> Money {
        money_or_zero(self.total_service_charge_money.as_ref())
    }

    /// The amount still owed. Older API versions omit `net_amount_due_money` on unpaid orders, in which case the
    /// total is owed in full.
    pub fn net_amount_due(&self) -> Money {
        self.net_amount_due_money.as_ref().map(SquareMoney::money).unwrap_or_else(|| self.total())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LineItem {
    pub uid: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: String,
    pub total_money: Option<SquareMoney>,
    #[serde(default)]
    pub modifiers: Vec<LineItemModifier>,
    #[serde(default)]
    pub applied_discounts: Vec<LineItemAppliedDiscount>,
}

impl LineItem {
    pub fn total(&self) -> Money {
        money_or_zero(self.total_money.as_ref())
    }

    /// The amount taken off this line by the discount with the given uid
    pub fn discount_applied(&self, discount_uid: &str) -> Money {
        self.applied_discounts
            .iter()
            .filter(|d| d.discount_uid == discount_uid)
            .map(|d| money_or_zero(d.applied_money.as_ref()))
            .sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LineItemModifier {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub total_price_money: Option<SquareMoney>,
}

impl LineItemModifier {
    pub fn total(&self) -> Money {
        money_or_zero(self.total_price_money.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LineItemAppliedDiscount {
    pub uid: Option<String>,
    pub discount_uid: String,
    pub applied_money: Option<SquareMoney>,
}
