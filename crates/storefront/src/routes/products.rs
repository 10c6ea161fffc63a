//! Product listing route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::{CategorySelection, Product};
use crate::state::AppState;

/// Limit options offered by the limit select.
pub const LIMIT_CHOICES: [u32; 3] = [3, 5, 10];

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub thumbnail: String,
    /// Formatted unit price, e.g. "$549.99".
    pub price: String,
    /// Raw decimal amount carried through the add-to-cart form.
    pub price_amount: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            category: product.category.clone(),
            thumbnail: product.thumbnail.clone(),
            price: product.price.display(),
            price_amount: product.price.amount.to_string(),
        }
    }
}

/// Catalog query parameters from the category and limit selects.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub limit: Option<u32>,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductCardView>,
    pub catalog_error: bool,
}

/// Render the product grid fragment.
///
/// A failed fetch renders the error placeholder into the grid container;
/// partial results are never shown.
#[instrument(skip(state))]
pub async fn grid(State(state): State<AppState>, Query(query): Query<CatalogQuery>) -> Response {
    let selection = query
        .category
        .as_deref()
        .map_or(CategorySelection::All, CategorySelection::parse);
    let limit = query.limit.unwrap_or(state.config().catalog.default_limit);

    match state.catalog().products(&selection, limit).await {
        Ok(products) => ProductGridTemplate {
            products: products.iter().map(ProductCardView::from).collect(),
            catalog_error: false,
        }
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch products for {selection:?}: {e}");
            ProductGridTemplate {
                products: Vec::new(),
                catalog_error: true,
            }
            .into_response()
        }
    }
}
