use uuid::Uuid;

/// Generates a fresh idempotency key for a single Square write. Square deduplicates writes that reuse a key, so
/// every new remote order or payment must get its own.
pub fn new_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

/// Formats an item quantity the way Square expects it: as a decimal string.
pub fn square_quantity(quantity: i64) -> String {
    quantity.to_string()
}
