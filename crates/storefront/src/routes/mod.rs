//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Home page: category/limit selects + product grid
//! GET  /health          - Health check
//!
//! # Products
//! GET  /products        - Product grid fragment (HTMX); query: category, limit
//!
//! # Cart (HTMX fragments)
//! GET  /cart            - Cart page with checkout summary
//! POST /cart/add        - Add item (returns count fragment, triggers cart-updated)
//! POST /cart/increment  - Quantity +1 (returns cart_items fragment)
//! POST /cart/decrement  - Quantity -1, removal at 1 (returns cart_items fragment)
//! POST /cart/remove     - Remove line (returns cart_items fragment)
//! GET  /cart/count      - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout        - Complete purchase: clear cart, render confirmation
//! ```

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/", get(products::grid))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product grid fragment
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout completion
        .route("/checkout", post(cart::checkout))
}
