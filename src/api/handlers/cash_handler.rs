//! Cash movement handlers.

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CashChange, CashReason, DateRange, RequestContext};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate)]
pub struct CashChangeRequest {
    pub amount: f64,
    pub reason: CashReason,
    #[serde(default)]
    #[validate(length(max = 500, message = "Comment is too long"))]
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct CashQuery {
    pub session_id: Option<i64>,
    #[serde(default)]
    pub from: i64,
    pub to: Option<i64>,
}

pub fn cash_routes() -> Router<AppState> {
    Router::new().route("/cashChanges", get(list).post(record))
}

pub async fn record(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CashChangeRequest>,
) -> AppResult<Created<CashChange>> {
    let change = state
        .services
        .cash()
        .record(&ctx, payload.amount, payload.reason, payload.comment)
        .await?;

    Ok(Created(change))
}

pub async fn list(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<CashQuery>,
) -> AppResult<ApiResponse<Vec<CashChange>>> {
    let range = DateRange {
        from: query.from,
        to: query.to,
    };
    let changes = state
        .services
        .cash()
        .list(&ctx, query.session_id, range)
        .await?;

    Ok(ApiResponse::success(changes))
}
