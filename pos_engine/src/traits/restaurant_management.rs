use crate::{
    db_types::{NewRestaurant, Restaurant},
    traits::StorageError,
};

/// Storage for the restaurant directory. Restaurants are keyed by a digest of the access token that identifies them.
#[allow(async_fn_in_trait)]
pub trait RestaurantManagement: Clone {
    async fn fetch_restaurant_by_token_hash(&self, token_hash: &str) -> Result<Option<Restaurant>, StorageError>;

    /// Inserts the restaurant unless one with the same token digest exists already, and returns whichever record is
    /// in the database afterwards. When several callers race to create the same restaurant, all of them receive the
    /// same row.
    async fn fetch_or_create_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, StorageError>;
}
