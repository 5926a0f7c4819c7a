//! Bazaar Storefront - demo binary.
//!
//! Loads the catalog, opens the persisted cart, and logs a short summary.
//! The real presentation layer is external; this binary exists to exercise
//! the storefront core end to end and to verify that a persisted cart
//! survives restarts.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use bazaar_storefront::cart::{CartStore, JsonFileStorage};
use bazaar_storefront::catalog::Catalog;
use bazaar_storefront::config::StorefrontConfig;

#[tokio::main]
async fn main() {
    // Load .env if present, then configuration from the environment.
    dotenvy::dotenv().ok();
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crates if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar_storefront=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load the catalog: configured file, or the builtin seed data.
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path).expect("Failed to load catalog"),
        None => Catalog::builtin(),
    };
    tracing::info!(
        products = catalog.len(),
        categories = catalog.categories().len(),
        brands = catalog.brands().len(),
        "catalog ready"
    );

    // Open the cart store over file-backed storage and hydrate it.
    let storage = Arc::new(JsonFileStorage::new(config.data_dir.clone()));
    let store = CartStore::new(storage);
    store.hydrate().await.expect("Failed to hydrate cart");
    store.ready().await;
    tracing::info!(
        lines = store.total_items(),
        units = store.cart_items_count(),
        total = %store.cart_total(),
        "cart hydrated"
    );

    // Flush pending persistence writes before exit.
    store.flush().await;
}
