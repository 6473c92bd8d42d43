//! Employee database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Employee, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub name: String,
    pub pin_hash: String,
    pub role: String,
    pub online: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Employee {
    fn from(model: Model) -> Self {
        Employee {
            id: model.id,
            org_id: model.org_id,
            outlet_id: model.outlet_id,
            name: model.name,
            pin_hash: model.pin_hash,
            // Unknown strings get the least privileged role
            role: model.role.parse().unwrap_or(Role::Cashier),
            online: model.online,
        }
    }
}
