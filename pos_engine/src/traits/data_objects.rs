use std::fmt::Display;

use pos_common::Money;
use serde::{Deserialize, Serialize};

/// The merchant behind an access token, as reported by the payments platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantIdentity {
    pub merchant_id: String,
    /// Location ids in the order the platform lists them
    pub location_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteOrderState {
    #[default]
    Open,
    Completed,
    Canceled,
    Draft,
    Unknown,
}

impl Display for RemoteOrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Open => "OPEN",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
            Self::Draft => "DRAFT",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Order-level amounts computed by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTotals {
    pub discounts: Money,
    /// The amount still owed on the order
    pub due: Money,
    pub tax: Money,
    pub service_charge: Money,
    pub tips: Money,
    /// Gross order total
    pub total: Money,
}

/// Per-line amounts computed by the platform. Discount and modifier amounts are listed in the same order as the
/// discounts and modifiers on the submitted item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLineItem {
    pub amount: Money,
    pub discount_amounts: Vec<Money>,
    pub modifier_amounts: Vec<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteOrderResult {
    pub order_id: String,
    pub state: RemoteOrderState,
    pub totals: RemoteTotals,
    /// One entry per submitted item, in submission order
    pub line_items: Vec<RemoteLineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePaymentResult {
    pub payment_id: String,
    pub status: String,
    /// The amount the platform confirmed as charged, excluding the tip
    pub amount: Money,
    pub tip: Money,
}
