//! Cash movements.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::base::ScopedSelect;
use super::entities::cash_change;
use crate::domain::{CashChange, CashReason, DateRange, Scope, WorkSession};
use crate::errors::AppResult;

pub struct CashRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CashRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Record a movement against `session`. `amount` is stored as given.
    pub async fn create(
        &self,
        session: &WorkSession,
        amount: f64,
        reason: CashReason,
        comment: String,
        created_at: i64,
    ) -> AppResult<CashChange> {
        let model = cash_change::ActiveModel {
            org_id: Set(session.org_id),
            outlet_id: Set(session.outlet_id),
            session_id: Set(session.id),
            amount: Set(amount),
            reason: Set(reason.as_str().to_string()),
            comment: Set(comment),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }

    pub async fn list(
        &self,
        scope: &Scope,
        session_id: Option<i64>,
        range: &DateRange,
    ) -> AppResult<Vec<CashChange>> {
        let mut query = cash_change::Entity::find()
            .scoped(scope)
            .within(cash_change::Column::CreatedAt, range);
        if let Some(session_id) = session_id {
            query = query.filter(cash_change::Column::SessionId.eq(session_id));
        }

        let models = query
            .order_by_desc(cash_change::Column::CreatedAt)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(CashChange::from).collect())
    }
}
