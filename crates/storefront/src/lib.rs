//! Bazaar Storefront - client-side storefront runtime.
//!
//! The storefront core is UI-agnostic: view components (grid, product
//! detail, cart page, header badge) live in the excluded presentation layer
//! and consume this crate through three surfaces:
//!
//! - [`catalog::Catalog`] - the read-only static product list, plus the pure
//!   filter functions the grid applies over it
//! - [`cart::CartStore`] - the single source of truth for cart line items:
//!   mutations, derived aggregates, change subscription, hydration, and
//!   ordered persistence
//! - [`config::StorefrontConfig`] - environment-based configuration
//!
//! Data flows one way: catalog -> views (read-only), views -> cart store
//! (mutate), cart store -> views (subscribe/read). Nothing but the cart
//! store touches persisted state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;

pub use cart::{CartStorage, CartStore, Hydration, JsonFileStorage, MemoryStorage};
pub use catalog::{Catalog, CategoryFilter, ProductFilter, filter_products};
pub use config::StorefrontConfig;
