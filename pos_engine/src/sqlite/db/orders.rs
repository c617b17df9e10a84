use chrono::{DateTime, Utc};
use log::{debug, trace};
use sqlx::SqliteConnection;

use super::totals;
use crate::{
    db_types::{Discount, Modifier, Order, OrderItem},
    traits::StorageError,
};

/// Inserts the order, its items (with their discounts and modifiers) and its totals using the given connection.
/// This is not atomic. Embed this call inside a transaction and pass `&mut *tx` as the connection argument.
///
/// The first statement must stay a write: a deferred transaction that reads first cannot take the write lock once
/// another connection has committed. Returns [`StorageError::OrderAlreadyExists`] if an order with the same id has
/// already been stored.
pub async fn insert_order(order: &Order, conn: &mut SqliteConnection) -> Result<Order, StorageError> {
    let mut record: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                id,
                restaurant_id,
                table_number,
                is_closed,
                remote_state,
                opened_at,
                closed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(&order.id)
    .bind(order.restaurant_id)
    .bind(&order.table_number)
    .bind(order.is_closed)
    .bind(&order.remote_state)
    .bind(order.opened_at)
    .bind(order.closed_at)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            StorageError::OrderAlreadyExists(order.id.clone())
        },
        e => StorageError::from(e),
    })?;
    for item in &order.items {
        let item = insert_item(&record.id, item, &mut *conn).await?;
        record.items.push(item);
    }
    record.totals = totals::insert_totals(&record.id, &order.totals, conn).await?;
    debug!("📝️ Order [{}] inserted with {} items", record.id, record.items.len());
    Ok(record)
}

async fn insert_item(order_id: &str, item: &OrderItem, conn: &mut SqliteConnection) -> Result<OrderItem, sqlx::Error> {
    let mut record: OrderItem = sqlx::query_as(
        r#"
            INSERT INTO order_items (order_id, position, name, comment, unit_price, quantity, amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(order_id)
    .bind(item.position)
    .bind(&item.name)
    .bind(&item.comment)
    .bind(item.unit_price.value())
    .bind(item.quantity)
    .bind(item.amount.value())
    .fetch_one(&mut *conn)
    .await?;
    for discount in &item.discounts {
        let d: Discount = sqlx::query_as(
            r#"
                INSERT INTO order_item_discounts (order_item_id, name, is_percentage, value, amount)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *;
            "#,
        )
        .bind(record.id)
        .bind(&discount.name)
        .bind(discount.is_percentage)
        .bind(discount.value)
        .bind(discount.amount.value())
        .fetch_one(&mut *conn)
        .await?;
        record.discounts.push(d);
    }
    for modifier in &item.modifiers {
        let m: Modifier = sqlx::query_as(
            r#"
                INSERT INTO order_item_modifiers (order_item_id, name, unit_price, quantity, amount)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *;
            "#,
        )
        .bind(record.id)
        .bind(&modifier.name)
        .bind(modifier.unit_price.value())
        .bind(modifier.quantity)
        .bind(modifier.amount.value())
        .fetch_one(&mut *conn)
        .await?;
        record.modifiers.push(m);
    }
    trace!("📝️ Item #{} ({}) inserted for order [{order_id}]", record.id, record.name);
    Ok(record)
}

/// Fetches the order, with its items and totals, if it belongs to the given restaurant.
pub async fn fetch_order(
    restaurant_id: i64,
    order_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = $1 AND restaurant_id = $2")
        .bind(order_id)
        .bind(restaurant_id)
        .fetch_optional(&mut *conn)
        .await?;
    match order {
        Some(order) => Ok(Some(load_children(order, conn).await?)),
        None => Ok(None),
    }
}

/// Fetches the order, with its items and totals, regardless of which restaurant it belongs to.
pub async fn fetch_order_by_id(order_id: &str, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order: Option<Order> =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(order_id).fetch_optional(&mut *conn).await?;
    match order {
        Some(order) => Ok(Some(load_children(order, conn).await?)),
        None => Ok(None),
    }
}

/// Fetches every order for the table, oldest first.
pub async fn fetch_orders_for_table(
    restaurant_id: i64,
    table_number: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, sqlx::Error> {
    let orders: Vec<Order> = sqlx::query_as(
        "SELECT * FROM orders WHERE restaurant_id = $1 AND table_number = $2 ORDER BY opened_at ASC, rowid ASC",
    )
    .bind(restaurant_id)
    .bind(table_number)
    .fetch_all(&mut *conn)
    .await?;
    let mut result = Vec::with_capacity(orders.len());
    for order in orders {
        result.push(load_children(order, &mut *conn).await?);
    }
    Ok(result)
}

/// Marks the order as closed. Orders that are already closed are left untouched, so `closed_at` records the first
/// time the order was closed. Returns `true` if the order was closed by this call.
pub async fn close_order(
    order_id: &str,
    closed_at: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE orders SET is_closed = 1, closed_at = $1 WHERE id = $2 AND is_closed = 0")
        .bind(closed_at)
        .bind(order_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() == 1)
}

async fn load_children(mut order: Order, conn: &mut SqliteConnection) -> Result<Order, sqlx::Error> {
    let mut items: Vec<OrderItem> = sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY position")
        .bind(&order.id)
        .fetch_all(&mut *conn)
        .await?;
    for item in &mut items {
        item.discounts = sqlx::query_as("SELECT * FROM order_item_discounts WHERE order_item_id = $1 ORDER BY id")
            .bind(item.id)
            .fetch_all(&mut *conn)
            .await?;
        item.modifiers = sqlx::query_as("SELECT * FROM order_item_modifiers WHERE order_item_id = $1 ORDER BY id")
            .bind(item.id)
            .fetch_all(&mut *conn)
            .await?;
    }
    order.items = items;
    order.totals = totals::fetch_totals(&order.id, conn).await?.ok_or(sqlx::Error::RowNotFound)?;
    Ok(order)
}
