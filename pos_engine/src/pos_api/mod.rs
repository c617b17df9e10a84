//! # Point-of-sale engine public API
//!
//! The `pos_api` module exposes the programmatic API for the engine.
//!
//! * [`restaurant_api`] is the restaurant directory. It resolves access tokens to a [`MerchantSession`].
//! * [`order_flow_api`] handles the order lifecycle: creating orders on the payments platform, reading them back, and
//!   reconciling payments against them.
//! * [`ledger`] holds the pure rules for an order's totals and its closed state.
//!
//! # API usage
//!
//! An API instance is created by supplying a storage backend and a payments gateway:
//!
//! ```rust,ignore
//! use pos_engine::{OrderFlowApi, RestaurantApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! let directory = RestaurantApi::new(db.clone(), gateway.clone());
//! let orders = OrderFlowApi::new(db, gateway);
//! let session = directory.resolve(&token).await?;
//! let order = orders.fetch_order(&session, "CAISENgvlJ6jLWAzERDzjyHVybY").await?;
//! ```
//!
//! [`MerchantSession`]: restaurant_api::MerchantSession

pub mod errors;
pub mod ledger;
pub mod order_flow_api;
pub mod order_objects;
pub mod restaurant_api;
