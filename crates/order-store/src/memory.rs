use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use domain::{Order, OrderInput};
use tokio::sync::RwLock;

use crate::{OrderId, Result, StoreError, store::OrderStore};

#[derive(Default)]
struct State {
    orders: BTreeMap<OrderId, Order>,
    last_id: u64,
}

/// In-memory order store.
///
/// The order map and the identifier counter sit behind one lock, so an id
/// is issued and its order inserted in a single critical section. Clones
/// share the same underlying state.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<State>>,
    initial_id: u64,
}

impl InMemoryOrderStore {
    /// Creates a new empty store. The first order gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose first order gets id `offset + 1`.
    pub fn starting_after(offset: u64) -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                orders: BTreeMap::new(),
                last_id: offset,
            })),
            initial_id: offset,
        }
    }

    /// Returns the number of stored orders.
    pub async fn len(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns true if no orders are stored.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.orders.is_empty()
    }

    /// Returns the most recently issued identifier, if any.
    pub async fn last_issued_id(&self) -> Option<OrderId> {
        let state = self.state.read().await;
        (state.last_id > self.initial_id).then(|| OrderId::new(state.last_id))
    }

    /// Removes all orders and resets the identifier counter.
    ///
    /// Meant for test isolation. Not exposed through the HTTP API.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.orders.clear();
        state.last_id = self.initial_id;
        metrics::gauge!("orders_stored").set(0.0);
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    #[tracing::instrument(skip(self, input))]
    async fn create(&self, input: OrderInput) -> Result<Order> {
        let products = input.into_products();

        let mut state = self.state.write().await;
        let next = state
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted {
                last_id: state.last_id,
            })?;
        let id = OrderId::new(next);
        // Build before bumping the counter so a rejected order burns no id.
        let order = Order::new(id, today(), products)?;
        state.last_id = id.as_u64();
        state.orders.insert(id, order.clone());

        metrics::counter!("orders_created_total").increment(1);
        metrics::gauge!("orders_stored").set(state.orders.len() as f64);
        tracing::debug!(%id, cost = %order.cost(), "order created");
        Ok(order)
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: OrderId) -> Option<Order> {
        self.state.read().await.orders.get(&id).cloned()
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> Vec<Order> {
        self.state.read().await.orders.values().cloned().collect()
    }

    #[tracing::instrument(skip(self, input))]
    async fn update(&self, id: OrderId, input: OrderInput) -> Result<Option<Order>> {
        if input.id.is_some_and(|supplied| supplied != id) || input.date.is_some() {
            tracing::debug!(%id, "ignoring client-supplied id or date");
        }
        let products = input.into_products();

        let mut state = self.state.write().await;
        let Some(existing) = state.orders.get(&id) else {
            return Ok(None);
        };
        let updated = existing.replaced_with(products)?;
        state.orders.insert(id, updated.clone());

        metrics::counter!("orders_updated_total").increment(1);
        tracing::debug!(%id, cost = %updated.cost(), "order updated");
        Ok(Some(updated))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: OrderId) -> bool {
        let mut state = self.state.write().await;
        let removed = state.orders.remove(&id).is_some();
        if removed {
            metrics::counter!("orders_deleted_total").increment(1);
            metrics::gauge!("orders_stored").set(state.orders.len() as f64);
        }
        removed
    }
}
