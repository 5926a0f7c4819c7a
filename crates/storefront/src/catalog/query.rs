//! Query-string codec for the sidebar filter.
//!
//! The sidebar keeps its state in the page URL so filtered views survive
//! reloads and can be shared. Parameters are omitted at their defaults:
//!
//! - `category` - lowercased category name (absent means "All")
//! - `price` - `min-max` decimal range (absent means 0-1000)
//! - `brands` - comma-joined brand names
//! - `search` - free-text term
//!
//! Parsing is tolerant: a malformed value leaves that field at its default
//! rather than failing.

use rust_decimal::Decimal;
use url::form_urlencoded;

use bazaar_core::types::Price;

use super::filter::{CategoryFilter, DEFAULT_MAX_PRICE_DOLLARS, ProductFilter};

impl ProductFilter {
    /// Parse a filter from a URL query string (without the leading `?`).
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut filter = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "category" => {
                    if !value.is_empty() && !value.eq_ignore_ascii_case("all") {
                        filter.category = CategoryFilter::Category(value.into_owned());
                    }
                }
                "price" => {
                    if let Some(range) = parse_price_range(&value) {
                        (filter.min_price, filter.max_price) = range;
                    }
                }
                "brands" => {
                    filter.brands = value
                        .split(',')
                        .filter(|b| !b.is_empty())
                        .map(ToString::to_string)
                        .collect();
                }
                "search" => filter.search = value.into_owned(),
                _ => {}
            }
        }

        filter
    }

    /// Serialize the filter to a URL query string, omitting defaults.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());

        if let CategoryFilter::Category(category) = &self.category {
            query.append_pair("category", &category.to_lowercase());
        }

        let default_max = Price::from_dollars(DEFAULT_MAX_PRICE_DOLLARS);
        if self.min_price > Price::ZERO || self.max_price != default_max {
            query.append_pair(
                "price",
                &format!("{}-{}", self.min_price.amount(), self.max_price.amount()),
            );
        }

        if !self.brands.is_empty() {
            let brands: Vec<&str> = self.brands.iter().map(String::as_str).collect();
            query.append_pair("brands", &brands.join(","));
        }

        if !self.search.is_empty() {
            query.append_pair("search", &self.search);
        }

        query.finish()
    }
}

/// Parse a `min-max` price range. `None` on any malformed part.
fn parse_price_range(value: &str) -> Option<(Price, Price)> {
    let (min, max) = value.split_once('-')?;
    let min: Decimal = min.trim().parse().ok()?;
    let max: Decimal = max.trim().parse().ok()?;
    Some((Price::new(min), Price::new(max)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_serializes_empty() {
        assert_eq!(ProductFilter::default().to_query(), "");
    }

    #[test]
    fn test_round_trip_preserves_non_default_fields() {
        let filter = ProductFilter {
            search: "running shoes".to_string(),
            category: CategoryFilter::Category("clothing".to_string()),
            brands: ["Nike".to_string(), "Adidas".to_string()].into(),
            ..ProductFilter::default()
        }
        .with_price_range(Decimal::from(50), Decimal::from(200));

        let query = filter.to_query();
        assert_eq!(ProductFilter::from_query(&query), filter);
    }

    #[test]
    fn test_query_layout() {
        let filter = ProductFilter {
            category: CategoryFilter::Category("Electronics".to_string()),
            search: "watch".to_string(),
            ..ProductFilter::default()
        };
        // Category is lowercased; default price range is omitted.
        assert_eq!(filter.to_query(), "category=electronics&search=watch");
    }

    #[test]
    fn test_malformed_price_falls_back_to_default() {
        let defaults = ProductFilter::default();
        for query in ["price=abc", "price=10", "price=10-", "price=-"] {
            let filter = ProductFilter::from_query(query);
            assert_eq!(filter.min_price, defaults.min_price, "{query}");
            assert_eq!(filter.max_price, defaults.max_price, "{query}");
        }
    }

    #[test]
    fn test_category_all_means_no_category_predicate() {
        let filter = ProductFilter::from_query("category=all");
        assert_eq!(filter.category, CategoryFilter::All);
    }

    #[test]
    fn test_brands_split_on_commas() {
        let filter = ProductFilter::from_query("brands=Nike,,IKEA");
        let expected: std::collections::BTreeSet<String> =
            ["Nike".to_string(), "IKEA".to_string()].into();
        assert_eq!(filter.brands, expected);
    }

    #[test]
    fn test_search_is_percent_decoded() {
        let filter = ProductFilter::from_query("search=desk%20lamp");
        assert_eq!(filter.search, "desk lamp");
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        let filter = ProductFilter::from_query("utm_source=newsletter&search=tablet");
        assert_eq!(filter.search, "tablet");
        assert_eq!(filter.category, CategoryFilter::All);
    }
}
