//! Integration test support for Bazaar.
//!
//! The tests in `tests/` play the role of the excluded view components:
//! they drive the catalog and cart store exactly the way the grid, product
//! detail, cart page, and header badge would.
