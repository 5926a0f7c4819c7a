//! Catalog product shape.
//!
//! Products are externally sourced, immutable catalog data. The cart never
//! mutates them; it carries a copy of the product alongside a quantity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, ReviewId};
use super::price::Price;

/// A catalog product.
///
/// Owned by the catalog provider. The shape mirrors the catalog JSON; no
/// validation is applied on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Category name (e.g., "Electronics").
    pub category: String,
    /// Image reference (path or URL).
    pub image: String,
    /// Long-form description.
    pub description: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    /// Brand name (e.g., "Apple").
    pub brand: String,
    /// Customer reviews, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Unique review ID (within the product).
    pub id: ReviewId,
    /// Reviewer display name.
    pub user: String,
    /// Rating given by this reviewer, 0.0 to 5.0.
    pub rating: f64,
    /// Date the review was posted.
    pub date: NaiveDate,
    /// Review body.
    pub comment: String,
}
