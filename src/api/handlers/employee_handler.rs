//! Employee handlers.

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Employee, RequestContext, Role};
use crate::errors::AppResult;
use crate::services::{CreateEmployeeInput, UpdateEmployeeInput};
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 4, max = 8, message = "PIN must be 4 to 8 digits"))]
    pub pin: String,
    pub role: Role,
    pub outlet_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 4, max = 8, message = "PIN must be 4 to 8 digits"))]
    pub pin: Option<String>,
    pub role: Option<Role>,
    pub outlet_id: Option<i64>,
}

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list).post(create))
        .route("/employees/:id", put(update).delete(remove))
}

pub async fn list(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Vec<Employee>>> {
    Ok(ApiResponse::success(state.services.employees().list(&ctx).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> AppResult<Created<Employee>> {
    let input = CreateEmployeeInput {
        name: payload.name,
        pin: payload.pin,
        role: payload.role,
        outlet_id: payload.outlet_id,
    };

    Ok(Created(state.services.employees().create(&ctx, input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> AppResult<ApiResponse<Employee>> {
    let input = UpdateEmployeeInput {
        name: payload.name,
        pin: payload.pin,
        role: payload.role,
        outlet_id: payload.outlet_id,
    };

    Ok(ApiResponse::success(state.services.employees().update(&ctx, id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.services.employees().delete(&ctx, id).await?;
    Ok(ApiResponse::ok())
}
