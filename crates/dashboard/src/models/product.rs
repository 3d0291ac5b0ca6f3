//! Product catalog models.

use serde::{Deserialize, Serialize};

use merchify_core::{Price, ProductId};

use super::validation::{ValidationError, normalize_tags, require_text};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Free-text category ("Ropa", "Calzado", ...).
    pub category: String,
    pub price: Price,
    pub stock: u32,
    pub description: String,
    /// Image references (URLs or storage keys).
    pub images: Vec<String>,
    pub tags: Vec<String>,
    /// Inactive products stay in the catalog but are not offered to customers.
    pub active: bool,
}

impl Product {
    /// Whether no units are left.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Whether the name or category contains `term`, ignoring case.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.category.to_lowercase().contains(&term)
    }
}

const fn default_active() -> bool {
    true
}

/// Fields for a new product.
///
/// Optional fields default to: no images, no tags, active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl NewProduct {
    /// Start a new product with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            stock: 0,
            description: String::new(),
            images: Vec::new(),
            tags: Vec::new(),
            active: true,
        }
    }

    #[must_use]
    pub const fn stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Validate and turn into a stored product with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] if the name is blank.
    pub fn into_product(self, id: ProductId) -> Result<Product, ValidationError> {
        require_text("name", &self.name)?;
        Ok(Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            stock: self.stock,
            description: self.description,
            images: self.images,
            tags: normalize_tags(self.tags),
            active: self.active,
        })
    }
}

/// A partial product update. `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ProductPatch {
    /// Check every provided field before anything is merged.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] if a provided name is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        Ok(())
    }

    /// Overlay the provided fields onto `product`.
    ///
    /// Callers validate first; the product ID is never changed.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(images) = self.images {
            product.images = images;
        }
        if let Some(tags) = self.tags {
            product.tags = normalize_tags(tags);
        }
        if let Some(active) = self.active {
            product.active = active;
        }
    }
}
