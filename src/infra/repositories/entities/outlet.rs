//! Outlet database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Outlet;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "outlets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Outlet {
    fn from(model: Model) -> Self {
        Outlet {
            id: model.id,
            org_id: model.org_id,
            name: model.name,
        }
    }
}
