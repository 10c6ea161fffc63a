//! Integration tests for cart mutations and persistence through the router.
//!
//! These drive the real routes with `tower::ServiceExt::oneshot` and a
//! memory storage backend, so the full form-to-fragment round trip is
//! covered without binding a port.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use bodega_storefront::cart::{CART_KEY, CartStorage, CartStore, MemoryStorage};
use bodega_storefront::config::{CatalogConfig, StorefrontConfig};
use bodega_storefront::routes;
use bodega_storefront::state::AppState;

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("host literal"),
        port: 0,
        catalog: CatalogConfig {
            // Never dialed by the cart routes
            base_url: "http://127.0.0.1:9".to_string(),
            categories: vec!["smartphones".to_string()],
            default_limit: 3,
        },
        data_dir: PathBuf::from("data"),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

async fn app_with_storage(storage: Arc<dyn CartStorage>) -> Router {
    let cart = CartStore::open(storage).await;
    let state = AppState::new(test_config(), cart);
    routes::routes().with_state(state)
}

async fn post_form(app: &Router, path: &str, body: &str) -> (StatusCode, String, Option<String>) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("build request");

    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let trigger = response
        .headers()
        .get("HX-Trigger")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, String::from_utf8_lossy(&bytes).to_string(), trigger)
}

async fn get_page(app: &Router, path: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("build request");

    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, String::from_utf8_lossy(&bytes).to_string())
}

#[tokio::test]
async fn test_adding_same_product_twice_increments_count() {
    let app = app_with_storage(Arc::new(MemoryStorage::default())).await;

    let (status, body, trigger) =
        post_form(&app, "/cart/add", "id=1&title=Phone&price=549.99").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trigger.as_deref(), Some("cart-updated"));
    assert!(body.contains(">1</span>"), "badge shows 1: {body}");

    let (_, body, _) = post_form(&app, "/cart/add", "id=1&title=Phone&price=549.99").await;
    assert!(body.contains(">2</span>"), "badge shows 2: {body}");

    // One line, quantity 2
    let (_, cart_page) = get_page(&app, "/cart").await;
    assert_eq!(cart_page.matches("class=\"cart-item\"").count(), 1);
    assert!(cart_page.contains("2 items"));
}

#[tokio::test]
async fn test_cart_page_shows_lines_and_checkout_summary() {
    let app = app_with_storage(Arc::new(MemoryStorage::default())).await;

    post_form(&app, "/cart/add", "id=1&title=Phone&price=549.99").await;
    post_form(&app, "/cart/add", "id=1&title=Phone&price=549.99").await;
    post_form(&app, "/cart/add", "id=2&title=Rice&price=2.99").await;

    let (status, body) = get_page(&app, "/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Phone"));
    assert!(body.contains("Rice"));
    assert!(body.contains("Price: $549.99"));
    assert!(body.contains("Line total: $1099.98"));
    assert!(body.contains("3 items"));
    assert!(body.contains("Total: $1102.97"));
}

#[tokio::test]
async fn test_decrementing_last_unit_removes_line() {
    let app = app_with_storage(Arc::new(MemoryStorage::default())).await;

    post_form(&app, "/cart/add", "id=7&title=Mug&price=9.50").await;
    let (status, body, trigger) = post_form(&app, "/cart/decrement", "id=7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(trigger.as_deref(), Some("cart-updated"));
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_remove_deletes_line_regardless_of_quantity() {
    let app = app_with_storage(Arc::new(MemoryStorage::default())).await;

    post_form(&app, "/cart/add", "id=7&title=Mug&price=9.50").await;
    post_form(&app, "/cart/increment", "id=7").await;
    let (_, body, _) = post_form(&app, "/cart/remove", "id=7").await;

    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_cart_survives_restart_via_persisted_snapshot() {
    let storage: Arc<MemoryStorage> = Arc::new(MemoryStorage::default());

    let app = app_with_storage(storage.clone()).await;
    post_form(&app, "/cart/add", "id=1&title=Phone&price=549.99").await;
    post_form(&app, "/cart/add", "id=2&title=Rice&price=2.99").await;

    assert!(
        storage
            .load(CART_KEY)
            .await
            .expect("load snapshot")
            .is_some()
    );

    // A fresh store over the same storage sees the same cart
    let reopened = app_with_storage(storage).await;
    let (_, body) = get_page(&reopened, "/cart").await;
    assert!(body.contains("Phone"));
    assert!(body.contains("Rice"));
    assert!(body.contains("2 items"));
}

#[tokio::test]
async fn test_checkout_empties_cart_and_clears_storage() {
    let storage: Arc<MemoryStorage> = Arc::new(MemoryStorage::default());
    let app = app_with_storage(storage.clone()).await;

    post_form(&app, "/cart/add", "id=1&title=Phone&price=549.99").await;
    post_form(&app, "/cart/add", "id=1&title=Phone&price=549.99").await;

    let (status, body, _) = post_form(&app, "/checkout", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Thank you for your purchase!"));
    assert!(body.contains("2 items, $1099.98 total."));

    assert!(
        storage
            .load(CART_KEY)
            .await
            .expect("load snapshot")
            .is_none()
    );

    let (_, cart_page) = get_page(&app, "/cart").await;
    assert!(cart_page.contains("Your cart is empty."));
}
