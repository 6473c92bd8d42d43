//! Cash movement database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{CashChange, CashReason};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cash_changes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub session_id: i64,
    pub amount: f64,
    pub reason: String,
    pub comment: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CashChange {
    fn from(model: Model) -> Self {
        CashChange {
            id: model.id,
            org_id: model.org_id,
            outlet_id: model.outlet_id,
            session_id: model.session_id,
            amount: model.amount,
            reason: model.reason.parse().unwrap_or(CashReason::Other),
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}
