//! Work session handlers.

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{DateRange, RequestContext, SessionAction, WorkSession};
use crate::errors::AppResult;
use crate::services::CloseSessionInput;
use crate::types::ApiResponse;

/// `action` selects open or close; the cash fields belong to that action.
#[derive(Debug, Deserialize, Validate)]
pub struct SessionRequest {
    pub action: SessionAction,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "open_cash must not be negative"))]
    pub open_cash: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "close_cash must not be negative"))]
    pub close_cash: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub earned_by_cash: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub earned_by_card: f64,
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(list).post(open_or_close))
        .route("/sessions.Last", get(last))
        .route("/sessions.Last.Closed", get(last_closed))
        .route("/sessions.Last.Me", get(last_for_me))
}

pub async fn open_or_close(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<SessionRequest>,
) -> AppResult<ApiResponse<WorkSession>> {
    let sessions = state.services.sessions();
    let session = match payload.action {
        SessionAction::Open => sessions.open(&ctx, payload.open_cash).await?,
        SessionAction::Close => {
            let input = CloseSessionInput {
                close_cash: payload.close_cash,
                earned_by_cash: payload.earned_by_cash,
                earned_by_card: payload.earned_by_card,
            };
            sessions.close(&ctx, input).await?
        }
    };

    Ok(ApiResponse::success(session))
}

pub async fn list(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(range): Query<DateRange>,
) -> AppResult<ApiResponse<Vec<WorkSession>>> {
    let sessions = state.services.sessions().list(&ctx, range).await?;
    Ok(ApiResponse::success(sessions))
}

pub async fn last(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Option<WorkSession>>> {
    Ok(ApiResponse::success(state.services.sessions().last(&ctx).await?))
}

pub async fn last_closed(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Option<WorkSession>>> {
    Ok(ApiResponse::success(state.services.sessions().last_closed(&ctx).await?))
}

pub async fn last_for_me(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Option<WorkSession>>> {
    Ok(ApiResponse::success(state.services.sessions().last_for_me(&ctx).await?))
}
