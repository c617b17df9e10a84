use pos_common::Money;
use serde::{Deserialize, Serialize};

/// An order as submitted by the front of house, before it has been created on the payments platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub table_number: String,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub name: String,
    pub comment: Option<String>,
    pub unit_price: Money,
    pub quantity: i64,
    pub discounts: Vec<NewDiscount>,
    pub modifiers: Vec<NewModifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDiscount {
    pub name: String,
    pub is_percentage: bool,
    /// A percentage (`12.5` is 12.5%) when `is_percentage` is set, otherwise an amount in major units
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewModifier {
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

/// A payment against an existing order. `payment_id` is handed to the payments platform as the idempotency key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub bill_amount: Money,
    pub tip_amount: Money,
    pub payment_id: String,
}

impl NewOrder {
    pub fn new(table_number: impl Into<String>) -> Self {
        Self { table_number: table_number.into(), items: vec![] }
    }

    pub fn with_item(mut self, item: NewOrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// Checks the order for values the payments platform would reject, or that make no sense for a restaurant order.
    pub fn validate(&self) -> Result<(), String> {
        if self.table_number.trim().is_empty() {
            return Err("tableNumber must not be empty".to_string());
        }
        if self.items.is_empty() {
            return Err("An order must contain at least one item".to_string());
        }
        self.items.iter().enumerate().try_for_each(|(i, item)| item.validate().map_err(|e| format!("Item {i}: {e}")))
    }
}

impl NewOrderItem {
    pub fn new(name: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        Self { name: name.into(), unit_price, quantity, ..Default::default() }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_discount(mut self, discount: NewDiscount) -> Self {
        self.discounts.push(discount);
        self
    }

    pub fn with_modifier(mut self, modifier: NewModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.quantity < 1 {
            return Err(format!("quantity must be at least 1, not {}", self.quantity));
        }
        if self.unit_price.is_negative() {
            return Err(format!("unitPrice must not be negative, not {}", self.unit_price));
        }
        for d in &self.discounts {
            d.validate()?;
        }
        for m in &self.modifiers {
            m.validate()?;
        }
        if self.gross_amount().is_none() {
            return Err(format!("the price of '{}' is too large", self.name));
        }
        Ok(())
    }

    /// The line price before discounts, modifiers included. `None` if it overflows.
    pub fn gross_amount(&self) -> Option<Money> {
        let base = self.unit_price.checked_mul(self.quantity)?;
        self.modifiers.iter().try_fold(base, |total, m| {
            let per_item = m.unit_price.checked_mul(m.quantity)?;
            total.checked_add(per_item.checked_mul(self.quantity)?)
        })
    }
}

impl NewDiscount {
    pub fn percentage(name: impl Into<String>, percentage: f64) -> Self {
        Self { name: name.into(), is_percentage: true, value: percentage }
    }

    pub fn fixed(name: impl Into<String>, amount: f64) -> Self {
        Self { name: name.into(), is_percentage: false, value: amount }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("discount name must not be empty".to_string());
        }
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(format!("discount '{}' has an invalid value: {}", self.name, self.value));
        }
        if self.is_percentage && self.value > 100.0 {
            return Err(format!("discount '{}' exceeds 100%", self.name));
        }
        Ok(())
    }
}

impl NewModifier {
    pub fn new(name: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        Self { name: name.into(), unit_price, quantity }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("modifier name must not be empty".to_string());
        }
        if self.quantity < 1 {
            return Err(format!("modifier '{}' must have a quantity of at least 1", self.name));
        }
        if self.unit_price.is_negative() {
            return Err(format!("modifier '{}' has a negative price", self.name));
        }
        Ok(())
    }
}

impl PaymentRequest {
    pub fn new(bill_amount: Money, tip_amount: Money, payment_id: impl Into<String>) -> Self {
        Self { bill_amount, tip_amount, payment_id: payment_id.into() }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.bill_amount.is_negative() || self.tip_amount.is_negative() {
            return Err("billAmount and tipAmount must not be negative".to_string());
        }
        let total = self
            .bill_amount
            .checked_add(self.tip_amount)
            .ok_or_else(|| "billAmount plus tipAmount is too large".to_string())?;
        if total <= Money::zero() {
            return Err("A payment must be for a positive amount".to_string());
        }
        if self.payment_id.trim().is_empty() {
            return Err("paymentId must not be empty".to_string());
        }
        Ok(())
    }
}
