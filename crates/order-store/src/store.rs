use async_trait::async_trait;
use domain::{Order, OrderInput};

use crate::{OrderId, Result};

/// Core trait for order store implementations.
///
/// The store is the only place that assigns order identifiers, stamps
/// creation dates and computes total costs. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Stores a new order built from `input`.
    ///
    /// The order receives the next identifier and today's date. Any id, date
    /// or cost carried by `input` is ignored; absent products mean an empty
    /// order with zero cost.
    async fn create(&self, input: OrderInput) -> Result<Order>;

    /// Returns the order with the given id, if present.
    async fn get_by_id(&self, id: OrderId) -> Option<Order>;

    /// Returns a snapshot of every stored order.
    ///
    /// No ordering is guaranteed. The returned values are owned copies.
    async fn list_all(&self) -> Vec<Order>;

    /// Replaces the products of an existing order.
    ///
    /// Returns `Ok(None)` without creating anything when `id` is absent.
    /// Otherwise the id and creation date of the stored order are kept, the
    /// cost is recomputed, and the whole value is swapped in atomically.
    async fn update(&self, id: OrderId, input: OrderInput) -> Result<Option<Order>>;

    /// Removes an order. Returns `false` if it was already absent.
    async fn delete_by_id(&self, id: OrderId) -> bool;
}
