//! Outlet handlers.

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Outlet, RequestContext};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOutletRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

pub fn outlet_routes() -> Router<AppState> {
    Router::new()
        .route("/outlets", get(list).post(create))
        .route("/outlets/:id", delete(remove))
}

pub async fn list(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Vec<Outlet>>> {
    Ok(ApiResponse::success(state.services.outlets().list(&ctx).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateOutletRequest>,
) -> AppResult<Created<Outlet>> {
    Ok(Created(state.services.outlets().create(&ctx, payload.name).await?))
}

/// Delete an outlet. The outlet an owner works at cannot be removed.
pub async fn remove(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.services.outlets().delete(&ctx, id).await?;
    Ok(ApiResponse::ok())
}
