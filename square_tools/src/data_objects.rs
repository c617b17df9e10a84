use std::fmt::Display;

use pos_common::Money;
use serde::{Deserialize, Serialize};

/// Square's representation of an amount of money: an integer number of the smallest denomination plus a currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareMoney {
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
}

impl SquareMoney {
    pub fn new(amount: Money, currency: &str) -> Self {
        Self { amount: amount.value(), currency: currency.to_string() }
    }

    pub fn money(&self) -> Money {
        Money::from(self.amount)
    }
}

/// Returns the amount in an optional money field, treating absent values as zero.
pub fn money_or_zero(m: Option<&SquareMoney>) -> Money {
    m.map(SquareMoney::money).unwrap_or_default()
}

/// Response of `POST /oauth2/token/status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenStatus {
    #[serde(default)]
    pub scopes: Vec<String>,
    pub expires_at: Option<String>,
    pub client_id: Option<String>,
    pub merchant_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: Option<String>,
    pub status: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SquareErrorDetail {
    pub category: String,
    pub code: String,
    pub detail: Option<String>,
    pub field: Option<String>,
}

impl Display for SquareErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.category, self.code)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        if let Some(field) = &self.field {
            write!(f, " ({field})")?;
        }
        Ok(())
    }
}

/// The error envelope that Square returns alongside any non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SquareErrorResponse {
    #[serde(default)]
    pub errors: Vec<SquareErrorDetail>,
}

impl SquareErrorResponse {
    pub fn summary(&self) -> String {
        self.errors.iter().map(|e| e.to_string()).collect::<Vec<String>>().join(", ")
    }
}
