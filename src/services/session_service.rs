//! Work session lifecycle: open, close and the session reads.

use async_trait::async_trait;
use std::sync::Arc;

use super::scope_service::{authorize_scope, authorize_write};
use crate::domain::session::ensure_can_open;
use crate::domain::{round_money, Action, DateRange, RequestContext, SessionClosing, WorkSession};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::NewSession;
use crate::infra::UnitOfWork;
use crate::utils::now_millis;

/// Figures reported when closing a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseSessionInput {
    pub close_cash: f64,
    pub earned_by_cash: f64,
    pub earned_by_card: f64,
}

#[async_trait]
pub trait SessionService: Send + Sync {
    /// Open a session for the calling employee at the scoped outlet.
    async fn open(&self, ctx: &RequestContext, open_cash: f64) -> AppResult<WorkSession>;

    /// Close the calling employee's open session.
    async fn close(&self, ctx: &RequestContext, input: CloseSessionInput)
        -> AppResult<WorkSession>;

    async fn list(&self, ctx: &RequestContext, range: DateRange) -> AppResult<Vec<WorkSession>>;

    /// Most recently opened session in scope.
    async fn last(&self, ctx: &RequestContext) -> AppResult<Option<WorkSession>>;

    async fn last_closed(&self, ctx: &RequestContext) -> AppResult<Option<WorkSession>>;

    /// The calling employee's latest session.
    async fn last_for_me(&self, ctx: &RequestContext) -> AppResult<Option<WorkSession>>;
}

pub struct SessionManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SessionManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> SessionService for SessionManager<U> {
    async fn open(&self, ctx: &RequestContext, open_cash: f64) -> AppResult<WorkSession> {
        let scope = authorize_write(ctx, Action::OpenSession, &self.uow.reader()).await?;
        let employee = *ctx.actor.employee()?;
        let new = NewSession {
            org_id: scope.org_id,
            outlet_id: scope.require_outlet()?,
            employee_id: employee.employee_id,
            open_cash: round_money(open_cash),
            opened_at: now_millis(),
        };

        let session = self
            .uow
            .transaction_serializable(move |tx| {
                Box::pin(async move {
                    let current = tx.sessions().find_open_for_employee(new.employee_id).await?;
                    ensure_can_open(current.as_ref())?;

                    let session = tx.sessions().create(new).await?;
                    tx.employees().set_online(new.employee_id, true).await?;
                    Ok(session)
                })
            })
            .await?;

        tracing::info!(
            session_id = session.id,
            employee_id = session.employee_id,
            outlet_id = session.outlet_id,
            "work session opened"
        );
        Ok(session)
    }

    async fn close(
        &self,
        ctx: &RequestContext,
        input: CloseSessionInput,
    ) -> AppResult<WorkSession> {
        authorize_write(ctx, Action::CloseSession, &self.uow.reader()).await?;
        let employee_id = ctx.actor.employee()?.employee_id;
        let closing = SessionClosing::new(
            input.close_cash,
            input.earned_by_cash,
            input.earned_by_card,
            now_millis(),
        );

        let session = self
            .uow
            .transaction(move |tx| {
                Box::pin(async move {
                    let open = tx
                        .sessions()
                        .find_open_for_employee(employee_id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    let receipt_count = tx.orders().count_for_session(open.id).await?;
                    let session = tx.sessions().close(open.id, closing, receipt_count).await?;
                    tx.employees().set_online(employee_id, false).await?;
                    Ok(session)
                })
            })
            .await?;

        tracing::info!(
            session_id = session.id,
            employee_id,
            receipt_count = session.receipt_count,
            "work session closed"
        );
        Ok(session)
    }

    async fn list(&self, ctx: &RequestContext, range: DateRange) -> AppResult<Vec<WorkSession>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadSessions, &reader).await?;
        reader.sessions().list(&scope, &range).await
    }

    async fn last(&self, ctx: &RequestContext) -> AppResult<Option<WorkSession>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadSessions, &reader).await?;
        reader.sessions().last(&scope).await
    }

    async fn last_closed(&self, ctx: &RequestContext) -> AppResult<Option<WorkSession>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadSessions, &reader).await?;
        reader.sessions().last_closed(&scope).await
    }

    async fn last_for_me(&self, ctx: &RequestContext) -> AppResult<Option<WorkSession>> {
        ctx.actor.authorize(Action::ReadSessions)?;
        let employee_id = ctx.actor.employee()?.employee_id;
        self.uow
            .reader()
            .sessions()
            .last_for_employee(employee_id)
            .await
    }
}
