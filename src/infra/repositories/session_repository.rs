//! Work session storage. Sessions are never deleted.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::base::ScopedSelect;
use super::entities::work_session;
use crate::domain::{DateRange, Scope, SessionClosing, WorkSession};
use crate::errors::{AppError, AppResult};

/// Opening figures of a new session.
#[derive(Debug, Clone, Copy)]
pub struct NewSession {
    pub org_id: i64,
    pub outlet_id: i64,
    pub employee_id: i64,
    pub open_cash: f64,
    pub opened_at: i64,
}

pub struct SessionRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SessionRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<WorkSession>> {
        let model = work_session::Entity::find_by_id(id).one(self.conn).await?;
        Ok(model.map(WorkSession::from))
    }

    pub async fn find_open_for_employee(&self, employee_id: i64) -> AppResult<Option<WorkSession>> {
        let model = work_session::Entity::find()
            .filter(work_session::Column::EmployeeId.eq(employee_id))
            .filter(work_session::Column::ClosedAt.is_null())
            .order_by_desc(work_session::Column::OpenedAt)
            .one(self.conn)
            .await?;
        Ok(model.map(WorkSession::from))
    }

    pub async fn create(&self, new: NewSession) -> AppResult<WorkSession> {
        let model = work_session::ActiveModel {
            org_id: Set(new.org_id),
            outlet_id: Set(new.outlet_id),
            employee_id: Set(new.employee_id),
            open_cash: Set(new.open_cash),
            close_cash: Set(0.0),
            earned_by_cash: Set(0.0),
            earned_by_card: Set(0.0),
            receipt_count: Set(0),
            opened_at: Set(new.opened_at),
            closed_at: Set(None),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }

    pub async fn close(
        &self,
        id: i64,
        closing: SessionClosing,
        receipt_count: i64,
    ) -> AppResult<WorkSession> {
        let model = work_session::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: work_session::ActiveModel = model.into();
        active.close_cash = Set(closing.close_cash);
        active.earned_by_cash = Set(closing.earned_by_cash);
        active.earned_by_card = Set(closing.earned_by_card);
        active.receipt_count = Set(receipt_count);
        active.closed_at = Set(Some(closing.closed_at));

        let model = active.update(self.conn).await?;
        Ok(model.into())
    }

    /// Sessions opened within `range`, newest first.
    pub async fn list(&self, scope: &Scope, range: &DateRange) -> AppResult<Vec<WorkSession>> {
        let models = work_session::Entity::find()
            .scoped(scope)
            .within(work_session::Column::OpenedAt, range)
            .order_by_desc(work_session::Column::OpenedAt)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(WorkSession::from).collect())
    }

    /// Most recently opened session in scope.
    pub async fn last(&self, scope: &Scope) -> AppResult<Option<WorkSession>> {
        let model = work_session::Entity::find()
            .scoped(scope)
            .order_by_desc(work_session::Column::OpenedAt)
            .order_by_desc(work_session::Column::Id)
            .one(self.conn)
            .await?;
        Ok(model.map(WorkSession::from))
    }

    /// Most recently closed session in scope.
    pub async fn last_closed(&self, scope: &Scope) -> AppResult<Option<WorkSession>> {
        let model = work_session::Entity::find()
            .scoped(scope)
            .filter(work_session::Column::ClosedAt.is_not_null())
            .order_by_desc(work_session::Column::ClosedAt)
            .order_by_desc(work_session::Column::Id)
            .one(self.conn)
            .await?;
        Ok(model.map(WorkSession::from))
    }

    pub async fn last_for_employee(&self, employee_id: i64) -> AppResult<Option<WorkSession>> {
        let model = work_session::Entity::find()
            .filter(work_session::Column::EmployeeId.eq(employee_id))
            .order_by_desc(work_session::Column::OpenedAt)
            .order_by_desc(work_session::Column::Id)
            .one(self.conn)
            .await?;
        Ok(model.map(WorkSession::from))
    }
}
