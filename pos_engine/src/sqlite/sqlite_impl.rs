//! `SqliteDatabase` is a concrete implementation of a point-of-sale engine storage backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the storage traits defined in the [`traits`]
//! module.
//!
//! [`traits`]: crate::traits
use std::fmt::Debug;

use chrono::Utc;
use log::*;
use pos_common::Money;
use sqlx::{migrate::MigrateError, SqlitePool};

use super::db::{new_pool, orders, restaurants, totals, MIGRATOR};
use crate::{
    db_types::{NewRestaurant, Order, Restaurant},
    ledger,
    traits::{OrderManagement, RestaurantManagement, StorageError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl RestaurantManagement for SqliteDatabase {
    async fn fetch_restaurant_by_token_hash(&self, token_hash: &str) -> Result<Option<Restaurant>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let restaurant = restaurants::fetch_restaurant_by_token_hash(token_hash, &mut conn).await?;
        Ok(restaurant)
    }

    async fn fetch_or_create_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, StorageError> {
        let mut conn = self.pool.acquire().await?;
        restaurants::fetch_or_create_restaurant(restaurant, &mut conn).await
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: &Order) -> Result<Order, StorageError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::insert_order(order, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order [{}] has been saved in the DB for restaurant #{}", order.id, order.restaurant_id);
        Ok(order)
    }

    async fn fetch_order(&self, restaurant_id: i64, order_id: &str) -> Result<Option<Order>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order(restaurant_id, order_id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_orders_for_table(
        &self,
        restaurant_id: i64,
        table_number: &str,
    ) -> Result<Vec<Order>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_orders_for_table(restaurant_id, table_number, &mut conn).await?;
        Ok(orders)
    }

    /// In a single atomic transaction,
    /// * adds the amounts to the order's running totals,
    /// * closes the order if it is now fully paid and not already closed,
    /// * reads back the updated order.
    async fn record_payment(&self, order_id: &str, paid: Money, tips: Money) -> Result<Order, StorageError> {
        let mut tx = self.pool.begin().await?;
        let totals = totals::increment_paid(order_id, paid, tips, &mut tx)
            .await?
            .ok_or_else(|| StorageError::OrderNotFound(order_id.to_string()))?;
        debug!("🗃️ Order [{order_id}] ledger updated. Paid {} of {}", totals.paid, totals.due);
        if ledger::recompute_closed_state(&totals) && orders::close_order(order_id, Utc::now(), &mut tx).await? {
            debug!("🗃️ Order [{order_id}] closed");
        }
        let order = orders::fetch_order_by_id(order_id, &mut tx)
            .await?
            .ok_or_else(|| StorageError::OrderNotFound(order_id.to_string()))?;
        tx.commit().await?;
        Ok(order)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        trace!("🗃️ Database is reachable");
        Ok(())
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { pool })
    }

    /// Brings the schema up to date. Safe to call on every startup.
    pub async fn run_migrations(&self) -> Result<(), MigrateError> {
        MIGRATOR.run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
