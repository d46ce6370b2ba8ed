use axum::{
    routing::{delete, get, post},
    Router,
};

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod system;

/// Router for the public shop endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .route("/cart", get(cart::view_cart))
        .route("/cart/items", post(cart::add_to_cart))
        .route("/cart/items/:id", delete(cart::remove_from_cart))
        .route("/checkout", post(checkout::checkout))
}
