//! Invitation database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Invitation;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "invitations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Issuing organization
    pub org_id: i64,
    /// NULL once activated
    pub code: Option<String>,
    /// NULL once activated
    pub expires_at: Option<i64>,
    pub affiliate_org_id: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Invitation {
    fn from(model: Model) -> Self {
        Invitation {
            id: model.id,
            org_id: model.org_id,
            code: model.code,
            expires_at: model.expires_at,
            affiliate_org_id: model.affiliate_org_id,
            created_at: model.created_at,
        }
    }
}
