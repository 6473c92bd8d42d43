//! Inventory count header database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::InventoryHistory;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_histories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub employee_id: Option<i64>,
    pub comment: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for InventoryHistory {
    fn from(model: Model) -> Self {
        InventoryHistory {
            id: model.id,
            org_id: model.org_id,
            outlet_id: model.outlet_id,
            employee_id: model.employee_id,
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}
