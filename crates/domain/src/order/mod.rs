//! Order values and related types.

mod cost;
mod model;
mod value_objects;

pub use cost::total_cost;
pub use model::{Order, OrderInput};
pub use value_objects::{Product, ProductId};

use thiserror::Error;

/// Errors that can occur while building an order value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Summing product costs left the representable decimal range.
    #[error("Total cost overflow after {products_summed} of {product_count} products")]
    CostOverflow {
        products_summed: usize,
        product_count: usize,
    },
}
