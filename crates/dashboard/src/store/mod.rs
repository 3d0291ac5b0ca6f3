//! In-memory collection store.
//!
//! [`DashboardStore`] owns the authoritative lists of conversations, orders
//! and products plus the store settings singleton. Reads filter and derive
//! statistics on every call; writes run to completion before returning, so
//! a single lock around the store is the whole concurrency story.
//!
//! Operations are split by collection:
//!
//! - [`conversations`] - inbox search and message append
//! - [`orders`] - order search, status filter and order statistics
//! - [`products`] - catalog search, CRUD and product statistics

pub mod conversations;
pub mod orders;
pub mod products;

use thiserror::Error;

use crate::models::{Conversation, Order, Product, StoreSettings, ValidationError};

pub use orders::{OrderStats, StatusFilter};
pub use products::ProductStats;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No entity with the given ID exists in its collection.
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Kind of entity ("conversation", "order", "product").
        entity: &'static str,
        /// Requested ID.
        id: String,
    },

    /// Input was rejected before any state changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// The dashboard's entity collections.
#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    conversations: Vec<Conversation>,
    orders: Vec<Order>,
    products: Vec<Product>,
    settings: StoreSettings,
}

impl DashboardStore {
    /// Create a store from existing collections.
    #[must_use]
    pub const fn new(
        conversations: Vec<Conversation>,
        orders: Vec<Order>,
        products: Vec<Product>,
        settings: StoreSettings,
    ) -> Self {
        Self {
            conversations,
            orders,
            products,
            settings,
        }
    }

    /// Current store settings.
    #[must_use]
    pub const fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Replace the settings singleton after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the new settings are rejected;
    /// the stored settings are left untouched.
    pub fn replace_settings(&mut self, settings: StoreSettings) -> Result<(), StoreError> {
        settings.validate()?;
        self.settings = settings;
        tracing::info!(store_name = %self.settings.store_name, "Store settings replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_settings() {
        let mut store = DashboardStore::default();
        let settings = StoreSettings {
            store_name: "Tienda Sol".to_string(),
            ..StoreSettings::default()
        };
        store.replace_settings(settings.clone()).expect("valid");
        assert_eq!(store.settings(), &settings);
    }

    #[test]
    fn test_invalid_settings_leave_store_untouched() {
        let mut store = DashboardStore::default();
        let settings = StoreSettings {
            store_name: String::new(),
            ..StoreSettings::default()
        };
        let err = store.replace_settings(settings).expect_err("invalid");
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.settings(), &StoreSettings::default());
    }

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("product", "42");
        assert_eq!(err.to_string(), "product '42' not found");
    }
}
