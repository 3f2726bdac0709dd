//! Order CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use common::OrderId;
use domain::{Order, OrderInput, Product};
use order_store::OrderStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore> {
    pub store: S,
}

impl<S: OrderStore> AppState<S> {
    /// Wraps a store for use by the handlers.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

// -- Request types --

/// Order body accepted by POST and PUT.
///
/// `id`, `date` and `cost` are accepted for symmetry with responses and
/// ignored by the store.
#[derive(Debug, Default, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub products: Option<Vec<Product>>,
}

impl From<OrderRequest> for OrderInput {
    fn from(req: OrderRequest) -> Self {
        OrderInput {
            id: req.id.map(OrderId::new),
            date: req.date,
            cost: req.cost,
            products: req.products,
        }
    }
}

// -- Response types --

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: u64,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub cost: Decimal,
    pub products: Vec<Product>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id().as_u64(),
            date: order.date(),
            cost: order.cost(),
            products: order.products().to_vec(),
        }
    }
}

// -- Handlers --

/// POST /orders: create an order from the request body.
#[tracing::instrument(skip(state, body))]
pub async fn create<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Bytes,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let req = decode_body(&body)?;

    let order = state.store.create(req.into()).await?;
    tracing::info!(id = %order.id(), "order created");

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /orders/{id}: fetch a single order.
#[tracing::instrument(skip(state))]
pub async fn get<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let id = parse_order_id(&id)?;
    let order = state
        .store
        .get_by_id(id)
        .await
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    Ok(Json(order.into()))
}

/// GET /orders: list every stored order.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<Vec<OrderResponse>> {
    let orders = state.store.list_all().await;
    Json(orders.into_iter().map(OrderResponse::from).collect())
}

/// PUT /orders/{id}: replace the products of an existing order.
#[tracing::instrument(skip(state, body))]
pub async fn update<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<OrderResponse>, ApiError> {
    let id = parse_order_id(&id)?;
    let req = decode_body(&body)?;

    let order = state
        .store
        .update(id, req.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found for update".to_string()))?;
    tracing::info!(%id, "order updated");

    Ok(Json(order.into()))
}

/// DELETE /orders/{id}: remove an order.
#[tracing::instrument(skip(state))]
pub async fn delete<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_order_id(&id)?;
    if !state.store.delete_by_id(id).await {
        return Err(ApiError::NotFound(
            "Order not found for deletion".to_string(),
        ));
    }
    tracing::info!(%id, "order deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT or DELETE on the collection path, which names no order.
pub async fn missing_id() -> ApiError {
    ApiError::BadRequest("Order ID is required in the path.".to_string())
}

/// Decodes an order body as JSON regardless of the request's content type.
pub fn decode_body(body: &[u8]) -> Result<OrderRequest, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// Parses the trailing path segment as an order id.
///
/// Anything other than a non-negative integer is a bad id, which is
/// distinct from the collection path carrying no id at all.
pub fn parse_order_id(segment: &str) -> Result<OrderId, ApiError> {
    segment
        .parse::<OrderId>()
        .map_err(|e| ApiError::BadRequest(format!("Invalid order id '{segment}': {e}")))
}
