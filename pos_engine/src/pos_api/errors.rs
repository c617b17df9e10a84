use thiserror::Error;

use crate::traits::{GatewayError, StorageError};

#[derive(Debug, Clone, Error)]
pub enum RestaurantApiError {
    #[error("No access token was provided")]
    NotAuthenticated,
    #[error("Could not identify the merchant for this token. {0}")]
    UpstreamUnavailable(String),
    #[error("{0}")]
    StorageError(#[from] StorageError),
}

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Invalid input. {0}")]
    InvalidInput(String),
    #[error("Order {0} not found")]
    OrderNotFound(String),
    #[error("{0}")]
    GatewayError(#[from] GatewayError),
    #[error("{0}")]
    StorageError(#[from] StorageError),
    /// The order exists on the payments platform but could not be saved locally.
    #[error("Order {remote_order_id} was created on the payments platform but could not be saved. {reason}")]
    DanglingRemoteOrder { remote_order_id: String, reason: String },
    /// The payments platform took the payment but the ledger could not be updated.
    #[error("Payment {payment_id} for order {order_id} was taken but could not be recorded. {reason}")]
    UnrecordedPayment { order_id: String, payment_id: String, reason: String },
}
