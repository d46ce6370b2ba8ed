use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde_json::json;

use quickbasket_core::{Entity, ProductId};
use quickbasket_products::Catalog;
use quickbasket_sales::SaleLedger;

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/:id", put(update_product).delete(delete_product))
        .route("/sales", get(list_sales))
}

pub async fn list_products(Extension(state): Extension<AppState>) -> axum::response::Response {
    super::products::list_products(Extension(state)).await
}

pub async fn create_product(
    Extension(state): Extension<AppState>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    let created = body
        .into_draft()
        .and_then(|draft| state.with_store(|store| store.create(draft)));
    let product = match created {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    tracing::info!(product_id = %product.id(), name = product.name(), "product created");
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Product added.",
            "product": dto::product_to_json(&product),
        })),
    )
        .into_response()
}

pub async fn update_product(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    let updated = id.parse::<ProductId>().and_then(|id| {
        let draft = body.into_draft()?;
        state.with_store(|store| store.update(id, draft))
    });
    let product = match updated {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    tracing::info!(product_id = %product.id(), "product updated");
    (
        StatusCode::OK,
        Json(json!({
            "message": "Product updated.",
            "product": dto::product_to_json(&product),
        })),
    )
        .into_response()
}

pub async fn delete_product(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let deleted = id
        .parse::<ProductId>()
        .and_then(|id| state.with_store(|store| store.delete(id)));
    let product = match deleted {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    tracing::info!(product_id = %product.id(), "product deleted");
    (
        StatusCode::OK,
        Json(json!({
            "message": "Product deleted.",
            "product": dto::product_to_json(&product),
        })),
    )
        .into_response()
}

pub async fn list_sales(Extension(state): Extension<AppState>) -> axum::response::Response {
    let items = state
        .with_store(|store| store.sales())
        .iter()
        .map(dto::sale_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}
