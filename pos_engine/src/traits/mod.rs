//! #  Backend contracts
//!
//! This module defines the interfaces that storage backends and payment platform integrations must expose in order
//! to be driven by the engine APIs.
//!
//! ## Storage
//! * [`RestaurantManagement`] maps access tokens to restaurant records, creating them on first sight.
//! * [`OrderManagement`] persists orders together with their items and totals, and applies payments to the totals
//!   ledger atomically.
//!
//! Both are implemented by [`crate::SqliteDatabase`].
//!
//! ## Payments platform
//! * [`PaymentsGateway`] is the narrow seam to the remote platform that issues order ids and takes payments. The
//!   engine never talks HTTP itself; the server supplies an implementation.
mod data_objects;
mod order_management;
mod payments_gateway;
mod restaurant_management;

pub use data_objects::{
    MerchantIdentity,
    RemoteLineItem,
    RemoteOrderResult,
    RemoteOrderState,
    RemotePaymentResult,
    RemoteTotals,
};
pub use order_management::{OrderManagement, StorageError};
pub use payments_gateway::{GatewayError, PaymentsGateway};
pub use restaurant_management::RestaurantManagement;
