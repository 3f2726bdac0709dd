//! Domain layer for the order service.
//!
//! This crate provides the value types stored by the order store:
//! - `Product` line items with exact decimal costs
//! - `Order` values whose total cost is always derived from their products
//! - `OrderInput`, the caller-supplied shape accepted on create and update
//! - `total_cost`, the one piece of arithmetic every write goes through

pub mod order;

pub use order::{Order, OrderError, OrderInput, Product, ProductId, total_cost};
