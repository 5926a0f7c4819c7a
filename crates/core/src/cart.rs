//! Pure cart state machine.
//!
//! [`CartState`] is an ordered collection of line items keyed by product ID.
//! All mutation goes through [`CartState::apply`] with a [`CartAction`]: a
//! pure transition function with no side effects, so persistence and change
//! notification can be layered on top by the storefront's cart store.
//!
//! # Invariants
//!
//! - Every line item has `quantity >= 1`; an item that would drop to zero or
//!   below is removed instead.
//! - No two line items share a product ID.
//! - Insertion order is preserved across transitions.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// A product in the cart, annotated with a purchase quantity.
///
/// On the wire the product's fields are flattened alongside `quantity`, so a
/// persisted line item is a product object with one extra field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product being purchased.
    #[serde(flatten)]
    pub product: Product,
    /// Units of this product in the cart. Always >= 1.
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// A cart mutation.
///
/// Actions are applied with [`CartState::apply`]. None of them can fail:
/// mutations referencing an absent product ID are no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add `quantity` units of a product. If the product is already in the
    /// cart, its quantity is incremented; otherwise a new line is appended.
    /// A quantity of zero is clamped to one.
    AddItem {
        product: Product,
        quantity: u32,
    },
    /// Remove the line with this product ID, if present.
    RemoveItem { id: ProductId },
    /// Set a line's quantity to exactly `quantity` (absolute, not a delta).
    /// A quantity of zero or below removes the line instead.
    UpdateQuantity { id: ProductId, quantity: i32 },
    /// Empty the cart unconditionally.
    Clear,
}

/// The cart: an ordered collection of [`CartItem`] keyed by unique product ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Line items in insertion order.
    pub items: Vec<CartItem>,
}

impl CartState {
    /// The empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Apply an action, producing the next state.
    ///
    /// Pure: `self` is not modified and no I/O happens here.
    #[must_use]
    pub fn apply(&self, action: CartAction) -> Self {
        let mut next = self.clone();
        match action {
            CartAction::AddItem { product, quantity } => {
                let quantity = quantity.max(1);
                if let Some(item) = next.items.iter_mut().find(|i| i.product.id == product.id) {
                    item.quantity += quantity;
                } else {
                    next.items.push(CartItem { product, quantity });
                }
            }
            CartAction::RemoveItem { id } => {
                next.items.retain(|i| i.product.id != id);
            }
            CartAction::UpdateQuantity { id, quantity } => {
                if quantity <= 0 {
                    // Non-positive quantity is a removal request, not an error.
                    next.items.retain(|i| i.product.id != id);
                } else if let Some(item) = next.items.iter_mut().find(|i| i.product.id == id) {
                    item.quantity = quantity.unsigned_abs();
                }
            }
            CartAction::Clear => next.items.clear(),
        }
        next
    }

    /// Sum of `price * quantity` over all lines.
    ///
    /// Recomputed from the collection on every call; nothing is cached.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total unit count: sum of quantities. Drives the header badge.
    #[must_use]
    pub fn cart_items_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Distinct line-item count.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product ID.
    #[must_use]
    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == id)
    }
}
