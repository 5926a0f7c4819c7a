//! Pure, stateless product filtering.
//!
//! The grid view applies a [`ProductFilter`] over the full catalog on every
//! render. A product matches only when ALL active predicates hold: the
//! filter is conjunctive, never disjunctive.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use bazaar_core::types::{Price, Product};

/// Upper price bound when no range is selected (the slider's maximum).
pub const DEFAULT_MAX_PRICE_DOLLARS: i64 = 1000;

/// Category predicate: match everything, or one category by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Match every category.
    #[default]
    All,
    /// Match one category, case-insensitively (query strings carry the
    /// lowercased name).
    Category(String),
}

impl CategoryFilter {
    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(selected) => selected.eq_ignore_ascii_case(category),
        }
    }
}

/// The active filter state of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// Free-text search term; empty means no search predicate.
    pub search: String,
    /// Category predicate.
    pub category: CategoryFilter,
    /// Inclusive lower price bound.
    pub min_price: Price,
    /// Inclusive upper price bound.
    pub max_price: Price,
    /// Selected brands; empty means no brand predicate.
    pub brands: BTreeSet<String>,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            min_price: Price::ZERO,
            max_price: Price::from_dollars(DEFAULT_MAX_PRICE_DOLLARS),
            brands: BTreeSet::new(),
        }
    }
}

impl ProductFilter {
    /// Whether a product satisfies every active predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.category.matches(&product.category)
            && product.price >= self.min_price
            && product.price <= self.max_price
            && (self.brands.is_empty() || self.brands.contains(&product.brand))
    }

    /// Case-insensitive substring match across title, description, brand,
    /// and category.
    fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        [
            &product.title,
            &product.description,
            &product.brand,
            &product.category,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// Set the price range from decimal bounds.
    #[must_use]
    pub fn with_price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_price = Price::new(min);
        self.max_price = Price::new(max);
        self
    }
}

/// Apply a filter over a product list, preserving catalog order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let catalog = Catalog::builtin();
        let filter = ProductFilter::default();
        assert_eq!(
            filter_products(catalog.products(), &filter).len(),
            catalog.len()
        );
    }

    #[test]
    fn test_category_and_price_are_conjunctive() {
        let catalog = Catalog::builtin();
        let filter = ProductFilter {
            category: CategoryFilter::Category("Electronics".to_string()),
            ..ProductFilter::default()
        }
        .with_price_range(Decimal::from(100), Decimal::from(500));

        let matched = filter_products(catalog.products(), &filter);
        assert!(!matched.is_empty());
        for product in &matched {
            assert_eq!(product.category, "Electronics");
            assert!(product.price >= Price::from_dollars(100));
            assert!(product.price <= Price::from_dollars(500));
        }
        // An Electronics product outside the range must not appear.
        assert!(!ids(&matched).contains(&1));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let catalog = Catalog::builtin();
        // Product 3 costs exactly 199.99.
        let bound: Decimal = "199.99".parse().unwrap();

        let filter = ProductFilter::default().with_price_range(bound, bound);
        assert_eq!(ids(&filter_products(catalog.products(), &filter)), vec![3]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let catalog = Catalog::builtin();

        for term in ["HEADPHONES", "ikea", "electronics", "noise cancellation"] {
            let filter = ProductFilter {
                search: term.to_string(),
                ..ProductFilter::default()
            };
            assert!(
                !filter_products(catalog.products(), &filter).is_empty(),
                "no match for {term}"
            );
        }
    }

    #[test]
    fn test_category_filter_ignores_case() {
        let catalog = Catalog::builtin();
        let filter = ProductFilter {
            category: CategoryFilter::Category("home".to_string()),
            ..ProductFilter::default()
        };
        let matched = filter_products(catalog.products(), &filter);
        assert!(matched.iter().all(|p| p.category == "Home"));
        assert!(!matched.is_empty());
    }

    #[test]
    fn test_brand_set_membership() {
        let catalog = Catalog::builtin();
        let filter = ProductFilter {
            brands: ["Nike".to_string(), "Adidas".to_string()].into(),
            ..ProductFilter::default()
        };
        let matched = filter_products(catalog.products(), &filter);
        assert!(!matched.is_empty());
        assert!(
            matched
                .iter()
                .all(|p| p.brand == "Nike" || p.brand == "Adidas")
        );
    }

    #[test]
    fn test_empty_brand_set_matches_all_brands() {
        let catalog = Catalog::builtin();
        let filter = ProductFilter::default();
        assert!(filter.brands.is_empty());
        assert_eq!(
            filter_products(catalog.products(), &filter).len(),
            catalog.len()
        );
    }

    #[test]
    fn test_all_predicates_together() {
        let catalog = Catalog::builtin();
        let filter = ProductFilter {
            search: "running".to_string(),
            category: CategoryFilter::Category("Clothing".to_string()),
            brands: ["Adidas".to_string()].into(),
            ..ProductFilter::default()
        }
        .with_price_range(Decimal::from(100), Decimal::from(200));

        // Only the Ultraboost satisfies all four predicates at once.
        assert_eq!(ids(&filter_products(catalog.products(), &filter)), vec![8]);
    }
}
