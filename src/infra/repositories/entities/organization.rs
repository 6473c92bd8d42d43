//! Organization database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Organization;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub email_confirmed: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Organization {
    fn from(model: Model) -> Self {
        Organization {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            email_confirmed: model.email_confirmed,
        }
    }
}
