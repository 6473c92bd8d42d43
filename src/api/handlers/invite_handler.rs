//! Affiliate invitation handlers.

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Router,
};

use crate::api::AppState;
use crate::domain::{Invitation, RequestContext};
use crate::errors::AppResult;
use crate::infra::repositories::InvitationFilter;
use crate::types::{ApiResponse, Created};

pub fn invite_routes() -> Router<AppState> {
    Router::new()
        .route("/invites", get(list_all).post(create))
        .route("/invites.Activated", get(list_activated))
        .route("/invites.NotActivated", get(list_not_activated))
        .route("/invites/:id", delete(remove))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Created<Invitation>> {
    Ok(Created(state.services.invitations().create(&ctx).await?))
}

async fn list(
    state: &AppState,
    ctx: &RequestContext,
    filter: InvitationFilter,
) -> AppResult<ApiResponse<Vec<Invitation>>> {
    let invitations = state.services.invitations().list(ctx, filter).await?;
    Ok(ApiResponse::success(invitations))
}

pub async fn list_all(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Vec<Invitation>>> {
    list(&state, &ctx, InvitationFilter::All).await
}

pub async fn list_activated(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Vec<Invitation>>> {
    list(&state, &ctx, InvitationFilter::Activated).await
}

pub async fn list_not_activated(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Vec<Invitation>>> {
    list(&state, &ctx, InvitationFilter::NotActivated).await
}

pub async fn remove(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.services.invitations().delete(&ctx, id).await?;
    Ok(ApiResponse::ok())
}
