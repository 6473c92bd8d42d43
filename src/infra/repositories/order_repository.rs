//! Receipt headers and lines.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::base::ScopedSelect;
use super::entities::{order_info, order_line};
use crate::domain::{DateRange, OrderInfo, OrderLine, OrderState, PayType, Product, Scope};
use crate::errors::AppResult;

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub org_id: i64,
    pub outlet_id: i64,
    pub session_id: i64,
    pub pay_type: PayType,
    pub cashier_name: String,
    pub created_at: i64,
}

pub struct OrderRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_scoped(&self, scope: &Scope, id: i64) -> AppResult<Option<OrderInfo>> {
        let model = order_info::Entity::find_by_id(id)
            .scoped(scope)
            .one(self.conn)
            .await?;
        Ok(model.map(OrderInfo::from))
    }

    /// Header read that blocks voids and recovers until the transaction ends.
    pub async fn find_scoped_for_update(
        &self,
        scope: &Scope,
        id: i64,
    ) -> AppResult<Option<OrderInfo>> {
        let model = order_info::Entity::find_by_id(id)
            .scoped(scope)
            .lock_exclusive()
            .one(self.conn)
            .await?;
        Ok(model.map(OrderInfo::from))
    }

    pub async fn list(&self, scope: &Scope, range: &DateRange) -> AppResult<Vec<OrderInfo>> {
        let models = order_info::Entity::find()
            .scoped(scope)
            .within(order_info::Column::CreatedAt, range)
            .order_by_desc(order_info::Column::CreatedAt)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(OrderInfo::from).collect())
    }

    pub async fn create(&self, new: NewOrder) -> AppResult<OrderInfo> {
        let model = order_info::ActiveModel {
            org_id: Set(new.org_id),
            outlet_id: Set(new.outlet_id),
            session_id: Set(new.session_id),
            pay_type: Set(new.pay_type.as_str().to_string()),
            cashier_name: Set(new.cashier_name),
            created_at: Set(new.created_at),
            voided: Set(false),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }

    /// Receipts recorded in a session, voided ones included.
    pub async fn count_for_session(&self, session_id: i64) -> AppResult<i64> {
        let count = order_info::Entity::find()
            .filter(order_info::Column::SessionId.eq(session_id))
            .count(self.conn)
            .await?;
        Ok(count as i64)
    }

    /// Flag the header and every line of a receipt, but only if the header
    /// is still in the opposite state. Returns `false` when another
    /// transaction got there first.
    pub async fn set_state(&self, id: i64, state: OrderState) -> AppResult<bool> {
        let voided = state.is_voided();
        let header = order_info::Entity::update_many()
            .col_expr(order_info::Column::Voided, Expr::value(voided))
            .filter(order_info::Column::Id.eq(id))
            .filter(order_info::Column::Voided.eq(!voided))
            .exec(self.conn)
            .await?;
        if header.rows_affected == 0 {
            return Ok(false);
        }
        order_line::Entity::update_many()
            .col_expr(order_line::Column::Voided, Expr::value(voided))
            .filter(order_line::Column::OrderId.eq(id))
            .exec(self.conn)
            .await?;
        Ok(true)
    }

    pub async fn lines(&self, order_id: i64) -> AppResult<Vec<OrderLine>> {
        let models = order_line::Entity::find()
            .filter(order_line::Column::OrderId.eq(order_id))
            .order_by_asc(order_line::Column::Id)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(OrderLine::from).collect())
    }

    /// Append a line, snapshotting the product's name and price.
    pub async fn add_line(
        &self,
        order: &OrderInfo,
        product: &Product,
        quantity: f64,
    ) -> AppResult<OrderLine> {
        let model = order_line::ActiveModel {
            org_id: Set(order.org_id),
            outlet_id: Set(order.outlet_id),
            order_id: Set(order.id),
            product_id: Set(product.id),
            product_name: Set(product.name.clone()),
            quantity: Set(quantity),
            price: Set(product.price),
            voided: Set(false),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }
}
