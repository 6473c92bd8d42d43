//! Manual cash movements on the caller's open session.

use async_trait::async_trait;
use std::sync::Arc;

use super::scope_service::{authorize_scope, authorize_write};
use crate::domain::{Action, CashChange, CashReason, DateRange, RequestContext};
use crate::errors::{AppError, AppResult, ConflictKind};
use crate::infra::UnitOfWork;
use crate::utils::now_millis;

#[async_trait]
pub trait CashService: Send + Sync {
    async fn record(
        &self,
        ctx: &RequestContext,
        amount: f64,
        reason: CashReason,
        comment: String,
    ) -> AppResult<CashChange>;

    async fn list(
        &self,
        ctx: &RequestContext,
        session_id: Option<i64>,
        range: DateRange,
    ) -> AppResult<Vec<CashChange>>;
}

pub struct CashManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CashManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CashService for CashManager<U> {
    async fn record(
        &self,
        ctx: &RequestContext,
        amount: f64,
        reason: CashReason,
        comment: String,
    ) -> AppResult<CashChange> {
        let scope = authorize_write(ctx, Action::RecordCashChange, &self.uow.reader()).await?;
        let employee_id = ctx.actor.employee()?.employee_id;
        let amount = reason.signed_amount(amount);
        let now = now_millis();

        let change = self
            .uow
            .transaction(move |tx| {
                Box::pin(async move {
                    let session = tx
                        .sessions()
                        .find_open_for_employee(employee_id)
                        .await?
                        .filter(|s| scope.contains(s.org_id, s.outlet_id))
                        .ok_or(AppError::StateConflict(ConflictKind::SessionNotOpen))?;
                    tx.cash().create(&session, amount, reason, comment, now).await
                })
            })
            .await?;

        tracing::info!(
            session_id = change.session_id,
            amount = change.amount,
            reason = change.reason.as_str(),
            "cash change recorded"
        );
        Ok(change)
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        session_id: Option<i64>,
        range: DateRange,
    ) -> AppResult<Vec<CashChange>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadCashChanges, &reader).await?;
        reader.cash().list(&scope, session_id, &range).await
    }
}
