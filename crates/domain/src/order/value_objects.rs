//! Value objects for the order domain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Caller-supplied product identifier.
///
/// Not checked for uniqueness within an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a product ID from a raw integer.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A named line item embedded in an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    /// The product identifier.
    pub id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Exact cost of this line item.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub cost: Decimal,
}

impl Product {
    /// Creates a new product.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, cost: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
        }
    }
}
