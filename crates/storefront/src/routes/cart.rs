//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation persists the cart before the re-rendered fragment is
//! returned, and carries an `HX-Trigger` so the header badge updates too.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use bodega_core::{Cart, CurrencyCode, Price, ProductId};

use crate::filters;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart
                .entries()
                .map(|(id, entry)| CartItemView {
                    id: id.to_string(),
                    title: entry.title.clone(),
                    quantity: entry.quantity,
                    price: entry.price.display(),
                    line_price: entry.price.times(entry.quantity).display(),
                })
                .collect(),
            subtotal: totals.total.display(),
            item_count: totals.item_count,
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
}

/// Form data naming an existing cart line.
#[derive(Debug, Deserialize)]
pub struct CartLineForm {
    pub id: i64,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/complete.html")]
pub struct CheckoutCompleteTemplate {
    pub item_count: u32,
    pub total: String,
}

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = CartView::from(&state.cart().snapshot().await);
    CartShowTemplate { cart }
}

/// Add an item to the cart (HTMX).
///
/// Increments the quantity if the product is already in the cart. Returns
/// the cart count badge with an HTMX trigger to update other fragments.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> impl IntoResponse {
    let price = Price::new(form.price, CurrencyCode::default());
    let cart = state
        .cart()
        .add(ProductId::new(form.id), &form.title, price)
        .await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.totals().item_count,
        },
    )
}

/// Increment a cart line's quantity (HTMX).
#[instrument(skip(state))]
pub async fn increment(
    State(state): State<AppState>,
    Form(form): Form<CartLineForm>,
) -> impl IntoResponse {
    let cart = state.cart().increment(ProductId::new(form.id)).await;
    cart_items_response(&cart)
}

/// Decrement a cart line's quantity (HTMX).
///
/// Decrementing a quantity-1 line removes it from the cart.
#[instrument(skip(state))]
pub async fn decrement(
    State(state): State<AppState>,
    Form(form): Form<CartLineForm>,
) -> impl IntoResponse {
    let cart = state.cart().decrement(ProductId::new(form.id)).await;
    cart_items_response(&cart)
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<CartLineForm>,
) -> impl IntoResponse {
    let cart = state.cart().remove(ProductId::new(form.id)).await;
    cart_items_response(&cart)
}

/// Get the cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.cart().snapshot().await.totals().item_count;
    CartCountTemplate { count }
}

/// Complete the purchase: clear the cart and its persisted snapshot, then
/// render the confirmation page with the purchased totals.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> impl IntoResponse {
    let totals = state.cart().complete_checkout().await;

    CheckoutCompleteTemplate {
        item_count: totals.item_count,
        total: totals.total.display(),
    }
}

fn cart_items_response(cart: &Cart) -> impl IntoResponse + use<> {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(cart),
        },
    )
}
