//! Products, ingredients and recipes feeding the ledger.

use async_trait::async_trait;
use std::sync::Arc;

use super::scope_service::{authorize_scope, authorize_write};
use crate::domain::{
    round_money, round_quantity, Action, Ingredient, MeasureUnit, Product, RecipeItem,
    RequestContext,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::NewIngredient;
use crate::infra::UnitOfWork;

#[derive(Debug, Clone)]
pub struct CreateIngredientInput {
    pub name: String,
    pub measure: MeasureUnit,
    pub purchase_price: f64,
    pub count: f64,
}

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn create_ingredient(
        &self,
        ctx: &RequestContext,
        input: CreateIngredientInput,
    ) -> AppResult<Ingredient>;

    async fn list_products(&self, ctx: &RequestContext) -> AppResult<Vec<Product>>;

    async fn create_product(
        &self,
        ctx: &RequestContext,
        name: String,
        price: f64,
    ) -> AppResult<Product>;

    async fn list_recipes(&self, ctx: &RequestContext) -> AppResult<Vec<RecipeItem>>;

    /// Link an ingredient to a product of the same outlet.
    async fn add_recipe_item(
        &self,
        ctx: &RequestContext,
        product_id: i64,
        ingredient_id: i64,
        quantity: f64,
    ) -> AppResult<RecipeItem>;
}

pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn create_ingredient(
        &self,
        ctx: &RequestContext,
        input: CreateIngredientInput,
    ) -> AppResult<Ingredient> {
        let reader = self.uow.reader();
        let scope = authorize_write(ctx, Action::ManageCatalog, &reader).await?;
        if input.count < 0.0 || input.purchase_price < 0.0 {
            return Err(AppError::validation("count and price cannot be negative"));
        }

        reader
            .ingredients()
            .create(NewIngredient {
                org_id: scope.org_id,
                outlet_id: scope.require_outlet()?,
                name: input.name,
                count: round_quantity(input.count),
                purchase_price: round_money(input.purchase_price),
                measure: input.measure,
            })
            .await
    }

    async fn list_products(&self, ctx: &RequestContext) -> AppResult<Vec<Product>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadCatalog, &reader).await?;
        reader.products().list(&scope).await
    }

    async fn create_product(
        &self,
        ctx: &RequestContext,
        name: String,
        price: f64,
    ) -> AppResult<Product> {
        let reader = self.uow.reader();
        let scope = authorize_write(ctx, Action::ManageCatalog, &reader).await?;
        if price < 0.0 {
            return Err(AppError::validation("price cannot be negative"));
        }

        reader
            .products()
            .create(scope.org_id, scope.require_outlet()?, name, round_money(price))
            .await
    }

    async fn list_recipes(&self, ctx: &RequestContext) -> AppResult<Vec<RecipeItem>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadCatalog, &reader).await?;
        reader.recipes().list(&scope).await
    }

    async fn add_recipe_item(
        &self,
        ctx: &RequestContext,
        product_id: i64,
        ingredient_id: i64,
        quantity: f64,
    ) -> AppResult<RecipeItem> {
        let reader = self.uow.reader();
        let scope = authorize_write(ctx, Action::ManageCatalog, &reader).await?;
        let outlet_id = scope.require_outlet()?;
        let quantity = round_quantity(quantity);
        if quantity <= 0.0 {
            return Err(AppError::validation("quantity must be positive"));
        }

        let product = reader
            .products()
            .find_in_outlet(outlet_id, product_id)
            .await?
            .ok_or_not_found()?;
        let ingredient = reader
            .ingredients()
            .find_in_outlet(outlet_id, ingredient_id)
            .await?
            .ok_or_not_found()?;

        reader.recipes().create(&product, ingredient.id, quantity).await
    }
}
