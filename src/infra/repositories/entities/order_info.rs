//! Receipt header database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{OrderInfo, OrderState, PayType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_infos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub session_id: i64,
    pub pay_type: String,
    pub cashier_name: String,
    pub created_at: i64,
    pub voided: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OrderInfo {
    fn from(model: Model) -> Self {
        OrderInfo {
            id: model.id,
            org_id: model.org_id,
            outlet_id: model.outlet_id,
            session_id: model.session_id,
            pay_type: model.pay_type.parse().unwrap_or(PayType::Cash),
            cashier_name: model.cashier_name,
            created_at: model.created_at,
            state: OrderState::from_voided(model.voided),
        }
    }
}
