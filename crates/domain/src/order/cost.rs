//! Total-cost computation.

use rust_decimal::Decimal;

use super::{OrderError, Product};

/// Sums product costs left to right with exact decimal addition.
///
/// An empty slice yields `Decimal::ZERO`. The sum never passes through a
/// binary float, so `100.50 + 250.75` is exactly `351.25`.
pub fn total_cost(products: &[Product]) -> Result<Decimal, OrderError> {
    products
        .iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |acc, (index, product)| {
            acc.checked_add(product.cost)
                .ok_or(OrderError::CostOverflow {
                    products_summed: index,
                    product_count: products.len(),
                })
        })
}
