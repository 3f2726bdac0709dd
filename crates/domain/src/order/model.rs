//! Order values and the caller-supplied order shape.

use chrono::NaiveDate;
use common::OrderId;
use rust_decimal::Decimal;

use super::{OrderError, Product, total_cost};

/// A stored order.
///
/// Orders are immutable values. The total cost is computed when the value is
/// built and can never be set directly, so `cost()` always equals the sum of
/// `products()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    date: NaiveDate,
    cost: Decimal,
    products: Vec<Product>,
}

impl Order {
    /// Builds a new order, deriving its cost from `products`.
    pub fn new(id: OrderId, date: NaiveDate, products: Vec<Product>) -> Result<Self, OrderError> {
        let cost = total_cost(&products)?;
        Ok(Self {
            id,
            date,
            cost,
            products,
        })
    }

    /// Builds the value that replaces this order on update.
    ///
    /// The identifier and creation date carry over; products and cost are
    /// taken from the replacement.
    pub fn replaced_with(&self, products: Vec<Product>) -> Result<Self, OrderError> {
        Self::new(self.id, self.date, products)
    }

    /// Returns the order identifier.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the creation date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the derived total cost.
    pub fn cost(&self) -> Decimal {
        self.cost
    }

    /// Returns the products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the number of products.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

/// Order-shaped input accepted by create and update.
///
/// `id`, `date` and `cost` are server-controlled. They are accepted so a
/// client can send back an order it received, but the store ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderInput {
    pub id: Option<OrderId>,
    pub date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub products: Option<Vec<Product>>,
}

impl OrderInput {
    /// Creates an input carrying only a product list.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Some(products),
            ..Self::default()
        }
    }

    /// Consumes the input and returns its products, empty when absent.
    pub fn into_products(self) -> Vec<Product> {
        self.products.unwrap_or_default()
    }
}
