//! Authenticated candidate records API built with Rust.
//!
//! Users register and log in with email and password, then manage the
//! candidate records owned by their account using a Bearer JWT.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::http::AppState;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build the API router (register, login, protected, candidates, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let protected_routes = axum::Router::new()
        .route("/protected", post(handlers::protected))
        .route(
            "/candidate",
            post(handlers::create_candidate).get(handlers::list_candidates),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    let api_routes = axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(protected_routes);

    axum::Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
