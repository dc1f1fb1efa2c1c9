//! Authenticated catalog-lookup API.
//!
//! `POST /login` exchanges credentials for a one-hour bearer token; the
//! catalog routes (`/products`, `/products/{id}`, `/categories`) require it.

pub mod auth;
pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Assembles the full application router.
pub fn app(state: AppState) -> Router {
    routes::create_router(state.clone())
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
