//! Authentication handlers.

use axum::{extract::State, routing::post, Extension, Router};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::Actor;
use crate::errors::AppResult;
use crate::services::{SignupInput, SignupResponse, TokenResponse};
use crate::types::{ApiResponse, Created};

/// Organization signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Affiliate invitation issued by another organization.
    #[validate(length(min = 1, message = "Invite code must not be empty"))]
    pub invite_code: Option<String>,
}

/// Organization login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
}

/// Employee PIN login, made with an organization token.
#[derive(Debug, Deserialize, Validate)]
pub struct EmployeeLoginRequest {
    pub employee_id: i64,
    #[validate(length(min = 4, max = 8, message = "PIN must be 4 to 8 digits"))]
    pub pin: String,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Routes that need an organization token
pub fn employee_auth_routes() -> Router<AppState> {
    Router::new().route("/auth/employee", post(employee_login))
}

pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<Created<SignupResponse>> {
    let response = state
        .services
        .auth()
        .signup(SignupInput {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            invite_code: payload.invite_code,
        })
        .await?;

    Ok(Created(response))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let token = state
        .services
        .auth()
        .login(payload.email, payload.password)
        .await?;

    Ok(ApiResponse::success(token))
}

pub async fn employee_login(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    ValidatedJson(payload): ValidatedJson<EmployeeLoginRequest>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let token = state
        .services
        .auth()
        .employee_login(&actor, payload.employee_id, payload.pin)
        .await?;

    Ok(ApiResponse::success(token))
}
