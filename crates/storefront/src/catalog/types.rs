//! Catalog API wire types and their domain conversions.
//!
//! The wire types mirror the JSON the catalog returns; the domain
//! [`Product`] is what the rest of the storefront sees. Keeping the two
//! separate means a catalog schema change stays inside this module.

use bodega_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A product as the storefront uses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub thumbnail: String,
    pub price: Price,
}

/// Which categories a product listing request covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    /// The "all" sentinel: every configured category.
    All,
    /// A single named category.
    Category(String),
}

impl CategorySelection {
    /// Parse the value of the category select.
    ///
    /// The sentinel `"all"` (any case) selects every configured category;
    /// anything else names a single category.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Response body of `GET /products/category/{name}`.
#[derive(Debug, Deserialize)]
pub struct CategoryListing {
    pub products: Vec<ProductData>,
}

/// One product as the catalog API serializes it.
///
/// Prices arrive as JSON numbers; the catalog does not state a currency, so
/// conversion assumes the default.
#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub id: i64,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    pub price: Decimal,
}

impl From<ProductData> for Product {
    fn from(data: ProductData) -> Self {
        Self {
            id: ProductId::new(data.id),
            title: data.title,
            category: data.category,
            thumbnail: data.thumbnail,
            price: Price::new(data.price, CurrencyCode::default()),
        }
    }
}
