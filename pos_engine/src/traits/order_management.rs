use pos_common::Money;
use thiserror::Error;

use crate::db_types::Order;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("We have an internal database engine (configuration/uptime etc.) : {0}")]
    DatabaseError(String),
    #[error("Cannot insert order, since it already exists with id {0}")]
    OrderAlreadyExists(String),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

/// The `OrderManagement` trait defines how orders, their items and their totals are persisted.
///
/// Every read is scoped to a restaurant. An order belonging to another restaurant is indistinguishable from one that
/// does not exist.
#[allow(async_fn_in_trait)]
pub trait OrderManagement: Clone {
    /// Stores the order, all its items (with their discounts and modifiers) and its totals in a single atomic
    /// transaction. The ids of `order.items` and their children are ignored; the returned record carries the ids
    /// assigned by the database.
    async fn insert_order(&self, order: &Order) -> Result<Order, StorageError>;

    /// Fetches the order with the given platform id, if it belongs to the restaurant.
    async fn fetch_order(&self, restaurant_id: i64, order_id: &str) -> Result<Option<Order>, StorageError>;

    /// Fetches every order placed at the given table, oldest first.
    async fn fetch_orders_for_table(&self, restaurant_id: i64, table_number: &str)
        -> Result<Vec<Order>, StorageError>;

    /// Adds `paid` and `tips` to the order's running totals, and closes the order if it is now fully paid. Both steps
    /// happen in one transaction, and the increment is applied in the database so that concurrent payments against
    /// the same order cannot overwrite each other.
    ///
    /// Returns the updated order, or [`StorageError::OrderNotFound`] if there are no totals for `order_id`.
    async fn record_payment(&self, order_id: &str, paid: Money, tips: Money) -> Result<Order, StorageError>;

    /// Succeeds if the store can currently serve queries.
    async fn ping(&self) -> Result<(), StorageError>;
}
