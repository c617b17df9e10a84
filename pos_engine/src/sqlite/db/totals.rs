use pos_common::Money;
use sqlx::SqliteConnection;

use crate::db_types::OrderTotals;

pub async fn insert_totals(
    order_id: &str,
    totals: &OrderTotals,
    conn: &mut SqliteConnection,
) -> Result<OrderTotals, sqlx::Error> {
    let totals = sqlx::query_as(
        r#"
            INSERT INTO order_totals (order_id, discounts, due, tax, service_charge, paid, tips, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *;
        "#,
    )
    .bind(order_id)
    .bind(totals.discounts.value())
    .bind(totals.due.value())
    .bind(totals.tax.value())
    .bind(totals.service_charge.value())
    .bind(totals.paid.value())
    .bind(totals.tips.value())
    .bind(totals.total.value())
    .fetch_one(conn)
    .await?;
    Ok(totals)
}

pub async fn fetch_totals(order_id: &str, conn: &mut SqliteConnection) -> Result<Option<OrderTotals>, sqlx::Error> {
    let totals =
        sqlx::query_as("SELECT * FROM order_totals WHERE order_id = $1").bind(order_id).fetch_optional(conn).await?;
    Ok(totals)
}

/// Adds to the running `paid` and `tips` totals of an order. The addition happens inside the database, so concurrent
/// payments against the same order are never lost. Returns the updated totals, or `None` if the order has no
/// totals record.
pub async fn increment_paid(
    order_id: &str,
    paid: Money,
    tips: Money,
    conn: &mut SqliteConnection,
) -> Result<Option<OrderTotals>, sqlx::Error> {
    let totals = sqlx::query_as(
        r#"
            UPDATE order_totals SET paid = paid + $1, tips = tips + $2
            WHERE order_id = $3
            RETURNING *;
        "#,
    )
    .bind(paid.value())
    .bind(tips.value())
    .bind(order_id)
    .fetch_optional(conn)
    .await?;
    Ok(totals)
}
