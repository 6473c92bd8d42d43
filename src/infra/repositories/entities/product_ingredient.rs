//! Recipe row database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::RecipeItem;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub product_id: i64,
    pub ingredient_id: i64,
    /// Consumed per unit sold
    pub quantity: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RecipeItem {
    fn from(model: Model) -> Self {
        RecipeItem {
            id: model.id,
            product_id: model.product_id,
            ingredient_id: model.ingredient_id,
            quantity: model.quantity,
        }
    }
}
