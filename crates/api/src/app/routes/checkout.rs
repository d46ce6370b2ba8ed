use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::app::{cart_cookie, dto, errors, AppState};

pub async fn checkout(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> axum::response::Response {
    let mut cart = cart_cookie::read_cart(&headers);

    let result = state
        .with_store(|store| quickbasket_sales::checkout(&mut **store, &mut cart, Utc::now()));
    let sale = match result {
        Ok(sale) => sale,
        Err(e) => {
            tracing::warn!(error = %e, "checkout rejected");
            return errors::domain_error_to_response(e);
        }
    };

    tracing::info!(
        sale_id = %sale.id(),
        total = %sale.total(),
        lines = sale.lines().len(),
        "checkout committed"
    );
    (
        StatusCode::OK,
        cart_cookie::clear_cart(),
        Json(json!({
            "message": format!("Checkout successful. Total paid: {}", sale.total()),
            "sale": dto::sale_to_json(&sale),
        })),
    )
        .into_response()
}
