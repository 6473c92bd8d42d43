//! Product and recipe handlers.

use axum::{extract::State, routing::get, Router};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Product, RecipeItem, RequestContext};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecipeItemRequest {
    pub product_id: i64,
    pub ingredient_id: i64,
    #[validate(range(exclusive_min = 0.0, message = "quantity must be positive"))]
    pub quantity: f64,
}

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/recipes", get(list_recipes).post(add_recipe_item))
}

pub async fn list_products(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Vec<Product>>> {
    Ok(ApiResponse::success(state.services.catalog().list_products(&ctx).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<Created<Product>> {
    let product = state
        .services
        .catalog()
        .create_product(&ctx, payload.name, payload.price)
        .await?;

    Ok(Created(product))
}

pub async fn list_recipes(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<ApiResponse<Vec<RecipeItem>>> {
    Ok(ApiResponse::success(state.services.catalog().list_recipes(&ctx).await?))
}

pub async fn add_recipe_item(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<RecipeItemRequest>,
) -> AppResult<Created<RecipeItem>> {
    let item = state
        .services
        .catalog()
        .add_recipe_item(&ctx, payload.product_id, payload.ingredient_id, payload.quantity)
        .await?;

    Ok(Created(item))
}
