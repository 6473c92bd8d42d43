//! Inventory count line database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::InventoryLine;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub history_id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub ingredient_id: i64,
    pub old_count: f64,
    pub new_count: f64,
    pub loss_price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for InventoryLine {
    fn from(model: Model) -> Self {
        InventoryLine {
            id: model.id,
            history_id: model.history_id,
            ingredient_id: model.ingredient_id,
            old_count: model.old_count,
            new_count: model.new_count,
            loss_price: model.loss_price,
        }
    }
}
