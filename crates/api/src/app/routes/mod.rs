use axum::{routing::get, Router};

pub mod branches;
pub mod franchises;
pub mod products;
pub mod system;

/// Router for every catalog endpoint (mounted under `/api`).
pub fn router() -> Router {
    Router::new()
        .nest("/franchises", franchises::router())
        .nest("/branches", branches::router())
        .nest("/products", products::router())
}

/// Liveness endpoints, outside `/api`.
pub fn system_router() -> Router {
    Router::new().route("/health", get(system::health))
}
