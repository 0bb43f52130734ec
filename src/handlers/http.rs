//! HTTP handlers: shared state, health and the protected probe.

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::JwtSecret;
use crate::db::DbPool;

/// Shared application state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub jwt_secret: JwtSecret,
}

impl AppState {
    pub fn new(db: DbPool, jwt_secret: JwtSecret) -> Self {
        Self { db, jwt_secret }
    }
    pub fn db(&self) -> &DbPool {
        &self.db
    }
    pub fn jwt_secret(&self) -> &JwtSecret {
        &self.jwt_secret
    }
}

/// POST /api/protected — answers only when the caller holds a valid token.
pub async fn protected() -> Json<serde_json::Value> {
    Json(json!({ "message": "This is a protected route" }))
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "candidates" })),
    )
}
