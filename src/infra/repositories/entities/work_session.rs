//! Work session database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::WorkSession;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub employee_id: i64,
    pub open_cash: f64,
    pub close_cash: f64,
    pub earned_by_cash: f64,
    pub earned_by_card: f64,
    pub receipt_count: i64,
    pub opened_at: i64,
    /// NULL while the session is open
    pub closed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for WorkSession {
    fn from(model: Model) -> Self {
        WorkSession {
            id: model.id,
            org_id: model.org_id,
            outlet_id: model.outlet_id,
            employee_id: model.employee_id,
            open_cash: model.open_cash,
            close_cash: model.close_cash,
            earned_by_cash: model.earned_by_cash,
            earned_by_card: model.earned_by_card,
            receipt_count: model.receipt_count,
            opened_at: model.opened_at,
            closed_at: model.closed_at,
        }
    }
}
