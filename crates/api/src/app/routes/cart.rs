use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use quickbasket_core::{DomainError, Entity, ProductId};
use quickbasket_products::Catalog;
use quickbasket_sales::{Cart, CartSummary};

use crate::app::{cart_cookie, dto, errors, AppState};

pub async fn add_to_cart(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(body): Json<dto::AddToCartRequest>,
) -> axum::response::Response {
    let mut cart = cart_cookie::read_cart(&headers);
    let qty = body.quantity.unwrap_or(1);

    let result = state.with_store(|store| {
        let product = cart.add(&*store, body.product_id, qty)?;
        let summary = view_or_empty(&cart, &**store)?;
        Ok::<_, DomainError>((product, summary))
    });
    let (product, summary) = match result {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    tracing::info!(product_id = %product.id(), quantity = qty, "added to cart");
    (
        StatusCode::OK,
        cart_cookie::set_cart(&cart),
        Json(json!({
            "message": format!("Added {qty} x {} to cart.", product.name()),
            "cart": dto::cart_to_json(&summary),
        })),
    )
        .into_response()
}

pub async fn remove_from_cart(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let mut cart = cart_cookie::read_cart(&headers);
    let removed = cart.remove(id);

    let summary = match state.with_store(|store| view_or_empty(&cart, &**store)) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let message = if removed {
        "Item removed from cart."
    } else {
        "Item not in cart."
    };

    (
        StatusCode::OK,
        cart_cookie::set_cart(&cart),
        Json(json!({
            "message": message,
            "removed": removed,
            "cart": dto::cart_to_json(&summary),
        })),
    )
        .into_response()
}

pub async fn view_cart(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> axum::response::Response {
    let cart = cart_cookie::read_cart(&headers);
    match state.with_store(|store| view_or_empty(&cart, &**store)) {
        Ok(summary) => (StatusCode::OK, Json(dto::cart_to_json(&summary))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// The web cart page renders an empty cart rather than an error.
fn view_or_empty<C>(cart: &Cart, catalog: &C) -> Result<CartSummary, DomainError>
where
    C: Catalog + ?Sized,
{
    match cart.view(catalog) {
        Err(DomainError::EmptyCart) => Ok(CartSummary {
            lines: Vec::new(),
            total: Default::default(),
        }),
        other => other,
    }
}
