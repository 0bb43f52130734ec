//! Auth HTTP handlers: register, login.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::auth::AuthAppService;
use crate::db::{user_create, user_find_by_email};
use crate::error::{validation_messages, AppError};
use crate::handlers::http::AppState;
use crate::models::{NewUser, UserView};

/// Profile field rules live on `NewUser`; only the raw password is checked here.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserView,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let password_check = body.validate();
    let RegisterRequest {
        first_name,
        last_name,
        email,
        password,
    } = body;

    // Profile is checked before hashing so every bad field is reported at once.
    let mut user = NewUser {
        first_name,
        last_name,
        email,
        password_hash: String::new(),
    };
    let messages: Vec<String> = [password_check, user.validate()]
        .into_iter()
        .filter_map(Result::err)
        .flat_map(|errors| validation_messages(&errors))
        .collect();
    if !messages.is_empty() {
        return Err(AppError::from_messages(messages));
    }

    user.password_hash = AuthAppService::hash_password(&password)?;
    let user = user_create(state.db(), &user).await?;
    info!(user_id = user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user: user.into(),
        }),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = user_find_by_email(state.db(), &body.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !AuthAppService::verify_password(&body.password, &user.password_hash)? {
        warn!(user_id = user.id, "login rejected: wrong password");
        return Err(AppError::Auth("Incorrect password".to_string()));
    }

    let token = state.jwt_secret().issue(user.id)?;
    info!(user_id = user.id, "login succeeded");

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
    }))
}
