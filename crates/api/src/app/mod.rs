//! HTTP API application wiring (Axum router + shared state).
//!
//! - `state.rs`: the shared store handle
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses
//! - `cart_cookie.rs`: the `cart` cookie transport

use axum::{routing::get, Router};

use crate::middleware::{self, AdminAuthState};

pub mod cart_cookie;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod state;

pub use state::AppState;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(state: AppState, admin_token: String) -> Router {
    let admin = routes::admin::router().layer(axum::middleware::from_fn_with_state(
        AdminAuthState::new(admin_token),
        middleware::admin_auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .nest("/admin", admin)
        .layer(axum::Extension(state))
}
