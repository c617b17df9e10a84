//! # Square tools
//!
//! A thin client for the parts of the Square Connect v2 REST API that a restaurant point-of-sale needs:
//!
//! * OAuth token status, to identify the merchant behind an access token.
//! * Locations, to find where orders should be placed.
//! * Orders and Payments.
//!
//! Access tokens are never stored by the client. Every call takes the caller's token explicitly, so a single
//! [`SquareApi`] instance (and its connection pool) can be shared by every merchant using the server.
mod api;
mod config;
mod error;
pub mod helpers;

mod data_objects;
mod square_order;
mod square_payment;

pub use api::SquareApi;
pub use config::{SquareConfig, SquareEnvironment};
pub use data_objects::{money_or_zero, Location, SquareErrorDetail, SquareErrorResponse, SquareMoney, TokenStatus};
pub use error::SquareApiError;
pub use square_order::{
    AppliedDiscountRef,
    CreateOrderRequest,
    DiscountType,
    LineItem,
    LineItemAppliedDiscount,
    LineItemModifier,
    NewLineItem,
    NewLineItemModifier,
    NewOrderDiscount,
    NewSquareOrder,
    OrderState,
    SquareOrder,
};
pub use square_payment::{CashPaymentDetails, CreatePaymentRequest, SquarePayment, CASH_SOURCE_ID};
