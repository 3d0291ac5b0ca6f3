//! Product catalog operations and statistics.

use serde::Serialize;

use merchify_core::ProductId;

use super::{DashboardStore, StoreError};
use crate::models::{NewProduct, Product, ProductPatch};

/// Catalog statistics, derived from the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total: usize,
    pub active: usize,
    pub out_of_stock: usize,
}

impl ProductStats {
    #[must_use]
    pub fn compute(products: &[Product]) -> Self {
        Self {
            total: products.len(),
            active: products.iter().filter(|p| p.active).count(),
            out_of_stock: products.iter().filter(|p| p.is_out_of_stock()).count(),
        }
    }
}

impl DashboardStore {
    /// Products whose name or category contains `term`, ignoring case.
    #[must_use]
    pub fn list_products(&self, term: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.matches(term)).collect()
    }

    /// Look up one product.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no product has this ID.
    pub fn get_product(&self, id: &ProductId) -> Result<&Product, StoreError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::not_found("product", id))
    }

    /// Add a product under a fresh ID and return it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the fields are rejected.
    pub fn create_product(&mut self, fields: NewProduct) -> Result<Product, StoreError> {
        let product = fields.into_product(ProductId::generate())?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        self.products.push(product.clone());
        Ok(product)
    }

    /// Overlay the provided fields onto an existing product and return the
    /// result. Omitted fields keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if a provided field is rejected and
    /// [`StoreError::NotFound`] if the product does not exist. Nothing is
    /// changed in either case.
    pub fn update_product(
        &mut self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, StoreError> {
        patch.validate()?;
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::not_found("product", id))?;

        patch.apply(product);
        tracing::info!(product_id = %id, "Product updated");
        Ok(product.clone())
    }

    /// Remove a product. Removing an absent ID is a no-op.
    ///
    /// Returns whether a product was removed.
    pub fn delete_product(&mut self, id: &ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| &p.id != id);
        let removed = self.products.len() != before;
        if removed {
            tracing::info!(product_id = %id, "Product deleted");
        } else {
            tracing::debug!(product_id = %id, "Delete of absent product ignored");
        }
        removed
    }

    /// Statistics over every stored product.
    #[must_use]
    pub fn product_stats(&self) -> ProductStats {
        ProductStats::compute(&self.products)
    }
}
