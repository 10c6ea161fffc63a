//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::catalog::CategorySelection;
use crate::filters;
use crate::routes::products::{LIMIT_CHOICES, ProductCardView};
use crate::state::AppState;

/// One entry of the category select.
#[derive(Clone)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One entry of the limit select.
#[derive(Clone)]
pub struct LimitOption {
    pub value: u32,
    pub selected: bool,
}

/// Home page template: selects plus the initial product grid.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub category_options: Vec<CategoryOption>,
    pub limit_options: Vec<LimitOption>,
    pub products: Vec<ProductCardView>,
    pub catalog_error: bool,
}

/// Build the category select entries: the "all" sentinel first, then each
/// configured category.
fn category_options(categories: &[String]) -> Vec<CategoryOption> {
    let mut options = vec![CategoryOption {
        value: "all".to_string(),
        label: "All Categories".to_string(),
        selected: true,
    }];
    options.extend(categories.iter().map(|category| CategoryOption {
        value: category.clone(),
        label: category.clone(),
        selected: false,
    }));
    options
}

/// Build the limit select entries, marking the configured default.
fn limit_options(default_limit: u32) -> Vec<LimitOption> {
    LIMIT_CHOICES
        .iter()
        .map(|&value| LimitOption {
            value,
            selected: value == default_limit,
        })
        .collect()
}

/// Display the home page with the "all" selection at the default limit.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config();
    let limit = config.catalog.default_limit;

    let (products, catalog_error) = match state
        .catalog()
        .products(&CategorySelection::All, limit)
        .await
    {
        Ok(products) => (products.iter().map(ProductCardView::from).collect(), false),
        Err(e) => {
            tracing::error!("Failed to fetch initial product listing: {e}");
            (Vec::new(), true)
        }
    };

    HomeTemplate {
        category_options: category_options(&config.catalog.categories),
        limit_options: limit_options(limit),
        products,
        catalog_error,
    }
}
