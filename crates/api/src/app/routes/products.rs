use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use quickbasket_core::{DomainError, ProductId};
use quickbasket_products::Catalog;

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
}

pub async fn list_products(Extension(state): Extension<AppState>) -> axum::response::Response {
    let items = state
        .with_store(|store| store.list())
        .iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_product(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match state.with_store(|store| store.get(id)) {
        Some(p) => (StatusCode::OK, Json(dto::product_to_json(&p))).into_response(),
        None => errors::domain_error_to_response(DomainError::not_found(format!("product {id}"))),
    }
}
