//! Receipt handlers: `orderInfo` headers and `orderList` lines.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{DateRange, OrderInfo, OrderLine, PayType, RequestContext};
use crate::errors::AppResult;
use crate::services::{OrderDetails, SellItem};
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub pay_type: PayType,
    #[serde(default)]
    pub items: Vec<SellItem>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SellRequest {
    pub order_id: i64,
    pub product_id: i64,
    #[validate(range(exclusive_min = 0.0, message = "quantity must be positive"))]
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct LinesQuery {
    pub order_id: i64,
}

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orderInfo", get(list).post(create))
        .route("/orderInfo/:id", post(recover).delete(void))
        .route("/orderList", get(lines).post(sell))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<Created<OrderDetails>> {
    let order = state
        .services
        .orders()
        .create(&ctx, payload.pay_type, payload.items)
        .await?;

    Ok(Created(order))
}

pub async fn list(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(range): Query<DateRange>,
) -> AppResult<ApiResponse<Vec<OrderInfo>>> {
    Ok(ApiResponse::success(state.services.orders().list(&ctx, range).await?))
}

pub async fn void(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<OrderInfo>> {
    Ok(ApiResponse::success(state.services.orders().void(&ctx, id).await?))
}

pub async fn recover(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<OrderInfo>> {
    Ok(ApiResponse::success(state.services.orders().recover(&ctx, id).await?))
}

pub async fn sell(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<SellRequest>,
) -> AppResult<Created<OrderLine>> {
    let item = SellItem {
        product_id: payload.product_id,
        quantity: payload.quantity,
    };
    let line = state
        .services
        .orders()
        .sell(&ctx, payload.order_id, item)
        .await?;

    Ok(Created(line))
}

pub async fn lines(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<LinesQuery>,
) -> AppResult<ApiResponse<Vec<OrderLine>>> {
    let lines = state.services.orders().lines(&ctx, query.order_id).await?;
    Ok(ApiResponse::success(lines))
}
