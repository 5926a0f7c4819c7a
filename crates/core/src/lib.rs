//! Bazaar Core - Shared domain types library.
//!
//! This crate provides the common types used across all Bazaar components:
//! - `storefront` - Client-side storefront runtime (catalog, cart store)
//! - `integration-tests` - Cross-crate scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage backends, no async runtime. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   catalog `Product` shape
//! - [`cart`] - The pure cart state machine: `CartState`, `CartAction`, and
//!   the transition function

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{CartAction, CartItem, CartState};
pub use types::*;
