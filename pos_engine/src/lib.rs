//! Point-of-sale engine
//!
//! The engine holds the core logic of the restaurant point-of-sale server. It is independent of HTTP and of any
//! particular payments platform.
//!
//! The library is divided into three main sections:
//! 1. Backend contracts ([`mod@traits`]). Storage backends implement [`RestaurantManagement`] and
//!    [`OrderManagement`]; payments platform integrations implement [`PaymentsGateway`]. SQLite is the supported
//!    storage backend ([`SqliteDatabase`]).
//! 2. The data types persisted by the engine ([`mod@db_types`]).
//! 3. The public API ([`mod@pos_api`]): the restaurant directory ([`RestaurantApi`]) and the order lifecycle
//!    ([`OrderFlowApi`]). The server only talks to the engine through these.
pub mod db_types;
pub mod helpers;
mod pos_api;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod traits;

pub use pos_api::{
    errors::{OrderFlowError, RestaurantApiError},
    ledger,
    order_flow_api::OrderFlowApi,
    order_objects,
    restaurant_api::{MerchantSession, RestaurantApi},
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{GatewayError, OrderManagement, PaymentsGateway, RestaurantManagement, StorageError};
