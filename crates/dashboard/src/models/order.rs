//! Order models.
//!
//! Orders carry denormalized copies of the customer and product fields they
//! were placed with. There is no reference back to a conversation or catalog
//! product, so renaming a product never rewrites order history.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use merchify_core::{DealStatus, OrderId, Price};

/// One product line on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name at the time of ordering.
    #[serde(rename = "name")]
    pub product_name: String,
    /// Units ordered; at least one.
    pub quantity: NonZeroU32,
    /// Unit price at the time of ordering.
    #[serde(rename = "price")]
    pub unit_price: Price,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub fn new(product_name: impl Into<String>, quantity: NonZeroU32, unit_price: Price) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity × unit_price`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price.times(self.quantity.get())
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub phone_number: String,
    pub customer_name: String,
    #[serde(rename = "products")]
    pub items: Vec<LineItem>,
    pub total_amount: Price,
    pub status: DealStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create an order whose total is derived from its line items.
    #[must_use]
    pub fn new(
        id: impl Into<OrderId>,
        phone_number: impl Into<String>,
        customer_name: impl Into<String>,
        items: Vec<LineItem>,
        status: DealStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total_amount = items.iter().map(LineItem::subtotal).sum();
        Self {
            id: id.into(),
            phone_number: phone_number.into(),
            customer_name: customer_name.into(),
            items,
            total_amount,
            status,
            created_at,
        }
    }

    /// Sum of line-item subtotals.
    #[must_use]
    pub fn computed_total(&self) -> Price {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Whether the stored total agrees with the line items.
    #[must_use]
    pub fn total_is_consistent(&self) -> bool {
        self.total_amount == self.computed_total()
    }

    /// Whether the customer name or order ID contains `term`, ignoring case.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.customer_name.to_lowercase().contains(&term)
            || self.id.as_str().to_lowercase().contains(&term)
    }
}
