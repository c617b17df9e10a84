use pos_common::{Money, Secret};
use thiserror::Error;

use crate::{
    order_objects::NewOrderItem,
    traits::{MerchantIdentity, RemoteOrderResult, RemotePaymentResult},
};

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("The payments platform rejected the request. {0}")]
    Rejected(String),
    #[error("The payments platform could not be reached. {0}")]
    Unavailable(String),
    #[error("The payments platform returned an unexpected response. {0}")]
    InvalidResponse(String),
    #[error("The request could not be translated for the payments platform. {0}")]
    InvalidRequest(String),
}

/// The remote payments platform.
///
/// Implementations translate between engine types and the platform's API. Every call is made on behalf of the
/// merchant owning `token`; implementations must not cache tokens between calls. Failures are reported once and never
/// retried.
#[allow(async_fn_in_trait)]
pub trait PaymentsGateway: Clone {
    /// Identifies the merchant that owns `token`, along with its locations.
    async fn resolve_merchant(&self, token: &Secret<String>) -> Result<MerchantIdentity, GatewayError>;

    /// Creates an order at `location_id` with one line per item. The returned line items are in the same order as
    /// `items`.
    async fn create_remote_order(
        &self,
        token: &Secret<String>,
        location_id: &str,
        items: &[NewOrderItem],
    ) -> Result<RemoteOrderResult, GatewayError>;

    /// Takes a payment of `bill_amount` plus `tip_amount` against a remote order. `idempotency_key` lets the
    /// platform recognise a resubmission of the same payment.
    async fn create_remote_payment(
        &self,
        token: &Secret<String>,
        location_id: &str,
        order_id: &str,
        bill_amount: Money,
        tip_amount: Money,
        idempotency_key: &str,
    ) -> Result<RemotePaymentResult, GatewayError>;
}
