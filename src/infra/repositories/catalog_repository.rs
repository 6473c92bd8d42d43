//! Ingredients, products and the recipe rows linking them.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::base::ScopedSelect;
use super::entities::{ingredient, product, product_ingredient};
use crate::domain::{round_quantity, Ingredient, MeasureUnit, Product, RecipeItem, Scope};
use crate::errors::AppResult;

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub org_id: i64,
    pub outlet_id: i64,
    pub name: String,
    pub count: f64,
    pub purchase_price: f64,
    pub measure: MeasureUnit,
}

pub struct IngredientRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> IngredientRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Ingredient `id` stocked at `outlet_id`.
    pub async fn find_in_outlet(&self, outlet_id: i64, id: i64) -> AppResult<Option<Ingredient>> {
        let model = ingredient::Entity::find_by_id(id)
            .filter(ingredient::Column::OutletId.eq(outlet_id))
            .one(self.conn)
            .await?;
        Ok(model.map(Ingredient::from))
    }

    pub async fn list(&self, scope: &Scope) -> AppResult<Vec<Ingredient>> {
        let models = ingredient::Entity::find()
            .scoped(scope)
            .order_by_asc(ingredient::Column::Name)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(Ingredient::from).collect())
    }

    pub async fn create(&self, new: NewIngredient) -> AppResult<Ingredient> {
        let model = ingredient::ActiveModel {
            org_id: Set(new.org_id),
            outlet_id: Set(new.outlet_id),
            name: Set(new.name),
            count: Set(new.count),
            purchase_price: Set(new.purchase_price),
            measure: Set(new.measure.as_str().to_string()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }

    /// Same as [`find_in_outlet`](Self::find_in_outlet) but holds the row
    /// lock until the transaction ends. No-op on SQLite.
    pub async fn find_in_outlet_for_update(
        &self,
        outlet_id: i64,
        id: i64,
    ) -> AppResult<Option<Ingredient>> {
        let model = ingredient::Entity::find_by_id(id)
            .filter(ingredient::Column::OutletId.eq(outlet_id))
            .lock_exclusive()
            .one(self.conn)
            .await?;
        Ok(model.map(Ingredient::from))
    }

    /// Overwrite the stock level.
    pub async fn set_count(&self, id: i64, count: f64) -> AppResult<()> {
        ingredient::Entity::update_many()
            .col_expr(ingredient::Column::Count, Expr::value(count))
            .filter(ingredient::Column::Id.eq(id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Add `delta` to the stock level in the database and return the row.
    ///
    /// The relative update takes the row lock, so concurrent movements on one
    /// ingredient queue up instead of overwriting each other. `None` when the
    /// ingredient is not stocked at `outlet_id`.
    pub async fn apply_delta(
        &self,
        outlet_id: i64,
        id: i64,
        delta: f64,
    ) -> AppResult<Option<Ingredient>> {
        let result = ingredient::Entity::update_many()
            .col_expr(
                ingredient::Column::Count,
                Expr::col(ingredient::Column::Count).add(delta),
            )
            .filter(ingredient::Column::Id.eq(id))
            .filter(ingredient::Column::OutletId.eq(outlet_id))
            .exec(self.conn)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        let Some(mut ingredient) = self.find_in_outlet(outlet_id, id).await? else {
            return Ok(None);
        };
        let rounded = round_quantity(ingredient.count);
        if rounded != ingredient.count {
            self.set_count(id, rounded).await?;
            ingredient.count = rounded;
        }
        Ok(Some(ingredient))
    }
}

pub struct ProductRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ProductRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_in_outlet(&self, outlet_id: i64, id: i64) -> AppResult<Option<Product>> {
        let model = product::Entity::find_by_id(id)
            .filter(product::Column::OutletId.eq(outlet_id))
            .one(self.conn)
            .await?;
        Ok(model.map(Product::from))
    }

    pub async fn list(&self, scope: &Scope) -> AppResult<Vec<Product>> {
        let models = product::Entity::find()
            .scoped(scope)
            .order_by_asc(product::Column::Name)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    pub async fn create(
        &self,
        org_id: i64,
        outlet_id: i64,
        name: String,
        price: f64,
    ) -> AppResult<Product> {
        let model = product::ActiveModel {
            org_id: Set(org_id),
            outlet_id: Set(outlet_id),
            name: Set(name),
            price: Set(price),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }
}

pub struct RecipeRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> RecipeRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn for_product(&self, product_id: i64) -> AppResult<Vec<RecipeItem>> {
        let models = product_ingredient::Entity::find()
            .filter(product_ingredient::Column::ProductId.eq(product_id))
            .order_by_asc(product_ingredient::Column::Id)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(RecipeItem::from).collect())
    }

    pub async fn list(&self, scope: &Scope) -> AppResult<Vec<RecipeItem>> {
        let models = product_ingredient::Entity::find()
            .scoped(scope)
            .order_by_asc(product_ingredient::Column::ProductId)
            .order_by_asc(product_ingredient::Column::Id)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(RecipeItem::from).collect())
    }

    pub async fn create(
        &self,
        product: &Product,
        ingredient_id: i64,
        quantity: f64,
    ) -> AppResult<RecipeItem> {
        let model = product_ingredient::ActiveModel {
            org_id: Set(product.org_id),
            outlet_id: Set(product.outlet_id),
            product_id: Set(product.id),
            ingredient_id: Set(ingredient_id),
            quantity: Set(quantity),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }
}
