//! HTTP API server for the order store.
//!
//! Exposes create, read, update and delete for orders as JSON over HTTP,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryOrderStore, OrderStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: OrderStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let collection = get(routes::orders::list::<S>)
        .post(routes::orders::create::<S>)
        .put(routes::orders::missing_id)
        .delete(routes::orders::missing_id);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", collection.clone())
        .route("/orders/", collection)
        .route(
            "/orders/{id}",
            get(routes::orders::get::<S>)
                .put(routes::orders::update::<S>)
                .delete(routes::orders::delete::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state backed by a fresh in-memory store.
///
/// The first order created gets id `id_offset + 1`.
pub fn create_default_state(id_offset: u64) -> Arc<AppState<InMemoryOrderStore>> {
    Arc::new(AppState::new(InMemoryOrderStore::starting_after(id_offset)))
}
