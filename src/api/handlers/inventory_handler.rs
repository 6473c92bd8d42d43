//! Ingredient stock handlers: arrivals and inventory counts.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    ArrivalItem, DateRange, Ingredient, InventoryHistory, InventoryLine, MeasureUnit,
    RequestContext,
};
use crate::errors::AppResult;
use crate::services::{ArrivalReceipt, CountItem, CreateIngredientInput};
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateIngredientRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub measure: MeasureUnit,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub purchase_price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub count: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ArrivalRequest {
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<ArrivalItem>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHistoryRequest {
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CountRequest {
    pub history_id: i64,
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<CountItem>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub history_id: i64,
}

pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/ingredients", get(list_ingredients).post(create_ingredient))
        .route("/ingredients.Arrival", post(arrival))
        .route("/inventoryHistory", get(list_histories).post(create_history))
        .route("/inventoryList", get(history_lines).post(record_count))
}

pub async fn list_ingredients(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Vec<Ingredient>>> {
    Ok(ApiResponse::success(state.services.inventory().list_ingredients(&ctx).await?))
}

pub async fn create_ingredient(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateIngredientRequest>,
) -> AppResult<Created<Ingredient>> {
    let input = CreateIngredientInput {
        name: payload.name,
        measure: payload.measure,
        purchase_price: payload.purchase_price,
        count: payload.count,
    };
    let ingredient = state.services.catalog().create_ingredient(&ctx, input).await?;

    Ok(Created(ingredient))
}

pub async fn arrival(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<ArrivalRequest>,
) -> AppResult<ApiResponse<ArrivalReceipt>> {
    let receipt = state.services.inventory().arrival(&ctx, payload.items).await?;
    Ok(ApiResponse::success(receipt))
}

pub async fn create_history(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateHistoryRequest>,
) -> AppResult<Created<InventoryHistory>> {
    let history = state
        .services
        .inventory()
        .create_history(&ctx, payload.comment)
        .await?;

    Ok(Created(history))
}

pub async fn list_histories(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(range): Query<DateRange>,
) -> AppResult<ApiResponse<Vec<InventoryHistory>>> {
    let histories = state.services.inventory().list_histories(&ctx, range).await?;
    Ok(ApiResponse::success(histories))
}

pub async fn record_count(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CountRequest>,
) -> AppResult<ApiResponse<Vec<InventoryLine>>> {
    let lines = state
        .services
        .inventory()
        .record_count(&ctx, payload.history_id, payload.items)
        .await?;

    Ok(ApiResponse::success(lines))
}

pub async fn history_lines(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<HistoryQuery>,
) -> AppResult<ApiResponse<Vec<InventoryLine>>> {
    let lines = state
        .services
        .inventory()
        .history_lines(&ctx, query.history_id)
        .await?;

    Ok(ApiResponse::success(lines))
}
