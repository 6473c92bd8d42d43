//! Employee management along the role hierarchy.

use async_trait::async_trait;
use std::sync::Arc;

use super::scope_service::{authorize_scope, authorize_write};
use crate::domain::{Action, Employee, Password, RequestContext, Role};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::{EmployeeChanges, NewEmployee};
use crate::infra::UnitOfWork;

#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    pub name: String,
    pub pin: String,
    pub role: Role,
    /// Defaults to the scoped outlet.
    pub outlet_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub pin: Option<String>,
    pub role: Option<Role>,
    pub outlet_id: Option<i64>,
}

#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Employee>>;

    async fn create(&self, ctx: &RequestContext, input: CreateEmployeeInput)
        -> AppResult<Employee>;

    async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: UpdateEmployeeInput,
    ) -> AppResult<Employee>;

    async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()>;
}

pub struct EmployeeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EmployeeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn ensure_can_manage(actor: Role, target: Role, is_self: bool) -> AppResult<()> {
    if actor.can_manage(target, is_self) {
        Ok(())
    } else {
        tracing::debug!(%actor, %target, is_self, "employee management not permitted");
        Err(AppError::Forbidden)
    }
}

#[async_trait]
impl<U: UnitOfWork> EmployeeService for EmployeeManager<U> {
    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Employee>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadEmployees, &reader).await?;
        reader.employees().list(&scope).await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateEmployeeInput,
    ) -> AppResult<Employee> {
        let reader = self.uow.reader();
        let scope = authorize_write(ctx, Action::ManageEmployees, &reader).await?;
        ensure_can_manage(ctx.actor.role(), input.role, false)?;

        let outlet_id = match input.outlet_id {
            Some(id) => id,
            None => scope.require_outlet()?,
        };
        let outlet = reader
            .outlets()
            .find_scoped(&scope, outlet_id)
            .await?
            .ok_or_not_found()?;
        let pin_hash = Password::pin(&input.pin)?.into_string();

        let employee = reader
            .employees()
            .create(NewEmployee {
                org_id: outlet.org_id,
                outlet_id: outlet.id,
                name: input.name,
                pin_hash,
                role: input.role,
            })
            .await?;

        tracing::info!(employee_id = employee.id, role = %employee.role, "employee created");
        Ok(employee)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: UpdateEmployeeInput,
    ) -> AppResult<Employee> {
        let reader = self.uow.reader();
        let scope = authorize_write(ctx, Action::ManageEmployees, &reader).await?;
        let actor_role = ctx.actor.role();
        let is_self = ctx.actor.employee().map_or(false, |e| e.employee_id == id);

        let target = reader
            .employees()
            .find_scoped(&scope, id)
            .await?
            .ok_or_not_found()?;
        ensure_can_manage(actor_role, target.role, is_self)?;

        if let Some(role) = input.role.filter(|r| *r != target.role) {
            if is_self {
                return Err(AppError::Forbidden);
            }
            ensure_can_manage(actor_role, role, false)?;
        }
        if let Some(outlet_id) = input.outlet_id {
            reader
                .outlets()
                .find_scoped(&scope, outlet_id)
                .await?
                .ok_or_not_found()?;
        }

        let pin_hash = match input.pin {
            Some(pin) => Some(Password::pin(&pin)?.into_string()),
            None => None,
        };

        reader
            .employees()
            .update(
                target.id,
                EmployeeChanges {
                    name: input.name,
                    pin_hash,
                    role: input.role,
                    outlet_id: input.outlet_id,
                },
            )
            .await
    }

    async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        let reader = self.uow.reader();
        let scope = authorize_write(ctx, Action::ManageEmployees, &reader).await?;

        let target = reader
            .employees()
            .find_scoped(&scope, id)
            .await?
            .ok_or_not_found()?;
        ensure_can_manage(ctx.actor.role(), target.role, false)?;

        reader.employees().delete(target.id).await?;
        tracing::info!(employee_id = id, "employee deleted");
        Ok(())
    }
}
