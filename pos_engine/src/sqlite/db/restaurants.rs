use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewRestaurant, Restaurant},
    traits::StorageError,
};

pub async fn fetch_restaurant_by_token_hash(
    token_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Restaurant>, sqlx::Error> {
    let restaurant = sqlx::query_as("SELECT * FROM restaurants WHERE auth_token_hash = $1")
        .bind(token_hash)
        .fetch_optional(conn)
        .await?;
    Ok(restaurant)
}

/// Inserts the restaurant, returning `None` if a restaurant with the same token digest already exists. The check and
/// the insert are a single statement, so concurrent callers cannot both succeed.
pub async fn insert_restaurant(
    restaurant: NewRestaurant,
    conn: &mut SqliteConnection,
) -> Result<Option<Restaurant>, sqlx::Error> {
    let restaurant = sqlx::query_as(
        r#"
            INSERT INTO restaurants (name, auth_token_hash, location_id, merchant_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (auth_token_hash) DO NOTHING
            RETURNING *;
        "#,
    )
    .bind(restaurant.name)
    .bind(restaurant.auth_token_hash)
    .bind(restaurant.location_id)
    .bind(restaurant.merchant_id)
    .fetch_optional(conn)
    .await?;
    Ok(restaurant)
}

/// Inserts the restaurant if its token digest is new, otherwise returns the existing record unchanged.
pub async fn fetch_or_create_restaurant(
    restaurant: NewRestaurant,
    conn: &mut SqliteConnection,
) -> Result<Restaurant, StorageError> {
    let token_hash = restaurant.auth_token_hash.clone();
    if let Some(r) = insert_restaurant(restaurant, &mut *conn).await? {
        debug!("🗃️ Restaurant #{} ({}) created", r.id, r.name);
        return Ok(r);
    }
    debug!("🗃️ Restaurant already exists for this token. Fetching it instead.");
    fetch_restaurant_by_token_hash(&token_hash, conn).await?.ok_or_else(|| {
        StorageError::DatabaseError("Restaurant insert was skipped, but no existing record was found".to_string())
    })
}
