//! Organizations, outlets and employees.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::base::ScopedSelect;
use super::entities::{employee, organization, outlet};
use crate::domain::{Employee, Organization, Outlet, Role, Scope};
use crate::errors::{AppError, AppResult};

pub struct OrganizationRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> OrganizationRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Organization>> {
        let model = organization::Entity::find_by_id(id).one(self.conn).await?;
        Ok(model.map(Organization::from))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Organization>> {
        let model = organization::Entity::find()
            .filter(organization::Column::Email.eq(email))
            .one(self.conn)
            .await?;
        Ok(model.map(Organization::from))
    }

    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        created_at: i64,
    ) -> AppResult<Organization> {
        let model = organization::ActiveModel {
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            email_confirmed: Set(false),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }
}

pub struct OutletRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> OutletRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Outlet>> {
        let model = outlet::Entity::find_by_id(id).one(self.conn).await?;
        Ok(model.map(Outlet::from))
    }

    /// Outlet `id` if it is visible in `scope`.
    pub async fn find_scoped(&self, scope: &Scope, id: i64) -> AppResult<Option<Outlet>> {
        let model = outlet::Entity::find_by_id(id)
            .scoped(scope)
            .one(self.conn)
            .await?;
        Ok(model.map(Outlet::from))
    }

    pub async fn list(&self, scope: &Scope) -> AppResult<Vec<Outlet>> {
        let models = outlet::Entity::find()
            .scoped(scope)
            .order_by_asc(outlet::Column::Id)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(Outlet::from).collect())
    }

    pub async fn create(&self, org_id: i64, name: String) -> AppResult<Outlet> {
        let model = outlet::ActiveModel {
            org_id: Set(org_id),
            name: Set(name),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = outlet::Entity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Fields of an employee about to be inserted.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub org_id: i64,
    pub outlet_id: i64,
    pub name: String,
    pub pin_hash: String,
    pub role: Role,
}

/// Partial employee update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub pin_hash: Option<String>,
    pub role: Option<Role>,
    pub outlet_id: Option<i64>,
}

pub struct EmployeeRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> EmployeeRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Employee>> {
        let model = employee::Entity::find_by_id(id).one(self.conn).await?;
        Ok(model.map(Employee::from))
    }

    pub async fn find_scoped(&self, scope: &Scope, id: i64) -> AppResult<Option<Employee>> {
        let model = employee::Entity::find_by_id(id)
            .scoped(scope)
            .one(self.conn)
            .await?;
        Ok(model.map(Employee::from))
    }

    pub async fn list(&self, scope: &Scope) -> AppResult<Vec<Employee>> {
        let models = employee::Entity::find()
            .scoped(scope)
            .order_by_asc(employee::Column::Id)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(Employee::from).collect())
    }

    pub async fn create(&self, new: NewEmployee) -> AppResult<Employee> {
        let model = employee::ActiveModel {
            org_id: Set(new.org_id),
            outlet_id: Set(new.outlet_id),
            name: Set(new.name),
            pin_hash: Set(new.pin_hash),
            role: Set(new.role.as_str().to_string()),
            online: Set(false),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }

    pub async fn update(&self, id: i64, changes: EmployeeChanges) -> AppResult<Employee> {
        let model = employee::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: employee::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(pin_hash) = changes.pin_hash {
            active.pin_hash = Set(pin_hash);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.as_str().to_string());
        }
        if let Some(outlet_id) = changes.outlet_id {
            active.outlet_id = Set(outlet_id);
        }

        let model = active.update(self.conn).await?;
        Ok(model.into())
    }

    pub async fn set_online(&self, id: i64, online: bool) -> AppResult<()> {
        employee::Entity::update_many()
            .col_expr(employee::Column::Online, Expr::value(online))
            .filter(employee::Column::Id.eq(id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Whether an owner-role employee is assigned to the outlet.
    pub async fn owner_assigned_to(&self, outlet_id: i64) -> AppResult<bool> {
        let count = employee::Entity::find()
            .filter(employee::Column::OutletId.eq(outlet_id))
            .filter(employee::Column::Role.eq(Role::Owner.as_str()))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = employee::Entity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
