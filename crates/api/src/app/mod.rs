//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and use-case wiring, path id parsing
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request validation and JSON response shapes
//! - `errors.rs`: consistent `{code, status, message}` error responses

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: AppServices) -> Router {
    Router::new()
        .merge(routes::system_router())
        .nest("/api", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(Extension(services)),
        )
}
