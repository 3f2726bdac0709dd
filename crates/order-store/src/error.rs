use domain::OrderError;
use thiserror::Error;

/// Errors that can occur when writing to the order store.
///
/// Missing orders are not errors; lookups return `Option` and deletes
/// return `bool`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The supplied products could not form a valid order.
    #[error("Invalid order: {0}")]
    Order(#[from] OrderError),

    /// The identifier counter has reached `u64::MAX`.
    #[error("Order ids exhausted after {last_id}")]
    IdsExhausted { last_id: u64 },
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
