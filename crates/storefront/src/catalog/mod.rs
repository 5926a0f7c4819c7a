//! Catalog provider: the read-only static product list.
//!
//! Products are loaded once (from a JSON file or the compiled-in seed data)
//! and never mutated. Filtering is not the catalog's job; see [`filter`] for
//! the pure filter functions the grid view applies over the full list.

pub mod filter;
pub mod query;

use std::path::Path;
use std::sync::{Arc, LazyLock};

use thiserror::Error;

use bazaar_core::types::{Product, ProductId};

pub use filter::{CategoryFilter, ProductFilter, filter_products};

/// Seed catalog compiled into the binary, used when no catalog path is
/// configured.
static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_json(include_str!("../../data/products.json"))
        .expect("builtin catalog is valid JSON")
});

/// Errors loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog JSON did not match the product shape.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The product catalog.
///
/// Cheaply cloneable; all clones share the same immutable product list. The
/// catalog does not validate externally sourced product data.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as a
    /// product array.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(products = catalog.len(), path = %path.display(), "loaded catalog");
        Ok(catalog)
    }

    /// Parse a catalog from a JSON product array.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the product shape.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// The compiled-in seed catalog.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID (the product detail view).
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct category names, sorted (the sidebar's category list).
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.products.iter().map(|p| p.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Distinct brand names, sorted (the sidebar's brand checkboxes).
    #[must_use]
    pub fn brands(&self) -> Vec<String> {
        let mut brands: Vec<String> = self.products.iter().map(|p| p.brand.clone()).collect();
        brands.sort();
        brands.dedup();
        brands
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());
        assert_eq!(
            catalog.categories(),
            vec!["Clothing", "Electronics", "Home"]
        );
        assert_eq!(
            catalog.brands(),
            vec!["Adidas", "Apple", "IKEA", "Nike", "Samsung"]
        );
    }

    #[test]
    fn test_product_lookup() {
        let catalog = Catalog::builtin();
        let product = catalog.product(ProductId::new(5)).unwrap();
        assert_eq!(product.title, "Air Runner Sneakers");
        assert!(catalog.product(ProductId::new(9999)).is_none());
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        assert!(matches!(
            Catalog::from_json(r#"{"not": "an array"}"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let missing = std::env::temp_dir().join("bazaar-no-such-catalog.json");
        assert!(matches!(
            Catalog::load(&missing),
            Err(CatalogError::Io(_))
        ));
    }
}
