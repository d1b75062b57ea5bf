//! API routes module

pub mod health;
pub mod products;
pub mod root;

use axum::Router;

use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Routes served at the root: welcome page, liveness and readiness
pub fn public_routes(state: &AppState) -> Router {
    Router::new()
        .merge(root::router())
        .merge(health::router(state.clone()))
}
