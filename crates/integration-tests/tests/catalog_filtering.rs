//! Sidebar-to-grid filtering scenarios.
//!
//! The sidebar serializes its state into the page URL; the grid parses it
//! back and filters the catalog. These tests drive that loop end to end.

#![allow(clippy::unwrap_used)]

use bazaar_core::types::Price;
use bazaar_storefront::catalog::{Catalog, CategoryFilter, ProductFilter, filter_products};

#[test]
fn test_url_driven_category_and_price_filter() {
    let catalog = Catalog::builtin();

    // The URL a shared "Electronics under $500" view would carry.
    let filter = ProductFilter::from_query("category=electronics&price=100-500");
    let matched = filter_products(catalog.products(), &filter);

    assert!(!matched.is_empty());
    for product in &matched {
        assert_eq!(product.category, "Electronics");
        assert!(product.price >= Price::from_dollars(100));
        assert!(product.price <= Price::from_dollars(500));
    }

    // Conjunctive: relaxing either predicate alone grows the result set.
    let category_only = ProductFilter {
        category: CategoryFilter::Category("electronics".to_string()),
        ..ProductFilter::default()
    };
    assert!(filter_products(catalog.products(), &category_only).len() > matched.len());
}

#[test]
fn test_search_narrows_within_brand_selection() {
    let catalog = Catalog::builtin();

    let filter = ProductFilter::from_query("brands=Samsung&search=tablet");
    let matched = filter_products(catalog.products(), &filter);
    assert_eq!(matched.len(), 1);
    let product = matched.first().unwrap();
    assert_eq!(product.brand, "Samsung");
    assert!(product.title.to_lowercase().contains("tablet"));
}

#[test]
fn test_sidebar_url_round_trip_reproduces_grid() {
    let catalog = Catalog::builtin();

    let sidebar = ProductFilter {
        search: "shoes".to_string(),
        category: CategoryFilter::Category("clothing".to_string()),
        brands: ["Nike".to_string()].into(),
        ..ProductFilter::default()
    };

    let reloaded = ProductFilter::from_query(&sidebar.to_query());
    assert_eq!(
        filter_products(catalog.products(), &sidebar),
        filter_products(catalog.products(), &reloaded)
    );
}

#[test]
fn test_filter_never_mutates_catalog() {
    let catalog = Catalog::builtin();
    let before: Vec<_> = catalog.products().to_vec();

    let filter = ProductFilter::from_query("category=home&price=0-100&search=lamp");
    let _ = filter_products(catalog.products(), &filter);

    assert_eq!(catalog.products(), &before[..]);
}
