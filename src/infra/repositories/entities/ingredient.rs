//! Ingredient database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Ingredient, MeasureUnit};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub name: String,
    pub count: f64,
    pub purchase_price: f64,
    pub measure: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Ingredient {
    fn from(model: Model) -> Self {
        Ingredient {
            id: model.id,
            org_id: model.org_id,
            outlet_id: model.outlet_id,
            name: model.name,
            count: model.count,
            purchase_price: model.purchase_price,
            measure: model.measure.parse().unwrap_or(MeasureUnit::Piece),
        }
    }
}
