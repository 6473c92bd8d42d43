//! Outlets of an organization.

use async_trait::async_trait;
use std::sync::Arc;

use super::scope_service::{authorize_scope, authorize_write};
use crate::domain::{Action, Outlet, RequestContext, Scope};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait OutletService: Send + Sync {
    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Outlet>>;

    async fn create(&self, ctx: &RequestContext, name: String) -> AppResult<Outlet>;

    /// Refused with `InUse` while an owner is assigned to the outlet or any
    /// record still references it.
    async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()>;
}

pub struct OutletManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OutletManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> OutletService for OutletManager<U> {
    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Outlet>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadOutlets, &reader).await?;
        reader.outlets().list(&scope).await
    }

    async fn create(&self, ctx: &RequestContext, name: String) -> AppResult<Outlet> {
        let scope = authorize_write(ctx, Action::ManageOutlets, &self.uow.reader()).await?;
        let outlet = self.uow.reader().outlets().create(scope.org_id, name).await?;
        tracing::info!(org_id = outlet.org_id, outlet_id = outlet.id, "outlet created");
        Ok(outlet)
    }

    async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        let scope = authorize_write(ctx, Action::ManageOutlets, &self.uow.reader()).await?;
        let org_scope = Scope {
            outlet_id: None,
            ..scope
        };

        self.uow
            .transaction(move |tx| {
                Box::pin(async move {
                    let outlet = tx.outlets().find_scoped(&org_scope, id).await?.ok_or_not_found()?;
                    if tx.employees().owner_assigned_to(outlet.id).await? {
                        return Err(AppError::in_use("Outlet"));
                    }
                    tx.outlets().delete(outlet.id).await
                })
            })
            .await?;

        tracing::info!(org_id = scope.org_id, outlet_id = id, "outlet deleted");
        Ok(())
    }
}
