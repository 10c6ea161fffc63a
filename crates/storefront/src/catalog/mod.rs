//! Catalog API client implementation.
//!
//! Talks to a dummyjson-shaped REST catalog with `reqwest` and caches
//! category listings with `moka` (5-minute TTL). The "all" selection fans
//! out one request per configured category and joins all-or-nothing: any
//! failed retrieval aborts the whole operation and partial results are
//! discarded.

mod types;

pub use types::{CategoryListing, CategorySelection, Product, ProductData};

use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::CatalogConfig;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("catalog returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote product catalog.
///
/// Category listings are cached per (category, limit) pair for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    categories: Vec<String>,
    cache: moka::future::Cache<String, Vec<Product>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = moka::future::Cache::builder()
            .max_capacity(100)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                categories: config.categories.clone(),
                cache,
            }),
        }
    }

    /// The categories covered by the "all" selection.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.inner.categories
    }

    /// Fetch one category listing.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// unparseable body.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn category(&self, category: &str, limit: u32) -> Result<Vec<Product>, CatalogError> {
        let cache_key = format!("category:{category}:{limit}");

        // Check cache
        if let Some(products) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category listing");
            return Ok(products);
        }

        let url = format!("{}/products/category/{category}", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let listing: CategoryListing = serde_json::from_str(&body)?;
        let products: Vec<Product> = listing.products.into_iter().map(Product::from).collect();

        // Cache the result
        self.inner.cache.insert(cache_key, products.clone()).await;

        Ok(products)
    }

    /// Fetch a product listing for a category selection.
    ///
    /// For [`CategorySelection::All`], every configured category is fetched
    /// concurrently and the results are merged preserving configured category
    /// order, then item order within each category. A single failure aborts
    /// the whole fetch; there is no partial-success policy, retry, or
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns the first retrieval error.
    #[instrument(skip(self))]
    pub async fn products(
        &self,
        selection: &CategorySelection,
        limit: u32,
    ) -> Result<Vec<Product>, CatalogError> {
        match selection {
            CategorySelection::Category(name) => self.category(name, limit).await,
            CategorySelection::All => {
                let fetches = self
                    .inner
                    .categories
                    .iter()
                    .map(|category| self.category(category, limit));

                let listings = try_join_all(fetches).await?;
                Ok(listings.into_iter().flatten().collect())
            }
        }
    }

    /// Invalidate all cached listings.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            body: "no such category".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "catalog returned HTTP 404 Not Found: no such category"
        );
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = CatalogClient::new(&CatalogConfig {
            base_url: "https://dummyjson.com/".to_string(),
            categories: vec!["smartphones".to_string()],
            default_limit: 3,
        });
        assert_eq!(client.inner.base_url, "https://dummyjson.com");
    }
}
