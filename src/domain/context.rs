//! Request context: who is calling and which tenant slice they act on.

use serde::Deserialize;

use super::role::{Action, Role};
use crate::errors::{AppError, AppResult};

/// An employee acting through an employee-level token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeActor {
    pub org_id: i64,
    pub outlet_id: i64,
    pub employee_id: i64,
    pub role: Role,
}

/// Verified caller identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// Organization account token. Acts with owner rights but has no
    /// employee record, so it cannot run a cash register.
    Organization { org_id: i64 },
    Employee(EmployeeActor),
}

impl Actor {
    pub fn org_id(&self) -> i64 {
        match self {
            Actor::Organization { org_id } => *org_id,
            Actor::Employee(e) => e.org_id,
        }
    }

    /// Effective role; an organization account ranks as owner.
    pub fn role(&self) -> Role {
        match self {
            Actor::Organization { .. } => Role::Owner,
            Actor::Employee(e) => e.role,
        }
    }

    pub fn employee(&self) -> AppResult<&EmployeeActor> {
        match self {
            Actor::Employee(e) => Ok(e),
            Actor::Organization { .. } => Err(AppError::Forbidden),
        }
    }

    pub fn permits(&self, action: Action) -> bool {
        if action.requires_employee() && matches!(self, Actor::Organization { .. }) {
            return false;
        }
        action.permits(self.role())
    }

    /// Reject with `Forbidden` when the permission table does not allow `action`.
    pub fn authorize(&self, action: Action) -> AppResult<()> {
        if self.permits(action) {
            Ok(())
        } else {
            tracing::debug!(?action, role = %self.role(), "action not permitted");
            Err(AppError::Forbidden)
        }
    }
}

/// Caller-supplied scope override taken from the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ScopeOverride {
    pub org_id: Option<i64>,
    pub outlet_id: Option<i64>,
}

/// Everything a domain operation needs to know about the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub actor: Actor,
    pub scope_override: ScopeOverride,
}

impl RequestContext {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            scope_override: ScopeOverride::default(),
        }
    }

    pub fn with_override(mut self, scope_override: ScopeOverride) -> Self {
        self.scope_override = scope_override;
        self
    }
}

/// Effective tenant filter applied to every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub org_id: i64,
    /// `None` covers every outlet of the organization.
    pub outlet_id: Option<i64>,
    /// Set when the scope was reached through an affiliate invitation.
    pub read_only: bool,
}

impl Scope {
    /// The caller's own scope, before any override.
    pub fn home(actor: &Actor) -> Self {
        match actor {
            Actor::Organization { org_id } => Self {
                org_id: *org_id,
                outlet_id: None,
                read_only: false,
            },
            Actor::Employee(e) => Self {
                org_id: e.org_id,
                outlet_id: Some(e.outlet_id),
                read_only: false,
            },
        }
    }

    pub fn ensure_writable(&self) -> AppResult<()> {
        if self.read_only {
            Err(AppError::Forbidden)
        } else {
            Ok(())
        }
    }

    /// Outlet the operation writes to; organization-wide scopes must name one.
    pub fn require_outlet(&self) -> AppResult<i64> {
        self.outlet_id
            .ok_or_else(|| AppError::BadRequest("outlet_id is required".to_string()))
    }

    pub fn contains(&self, org_id: i64, outlet_id: i64) -> bool {
        self.org_id == org_id && self.outlet_id.map_or(true, |o| o == outlet_id)
    }
}

/// Inclusive epoch-millisecond range: `date >= from [AND date <= to]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub from: i64,
    pub to: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cashier() -> Actor {
        Actor::Employee(EmployeeActor {
            org_id: 1,
            outlet_id: 10,
            employee_id: 100,
            role: Role::Cashier,
        })
    }

    #[test]
    fn test_home_scope() {
        assert_eq!(
            Scope::home(&cashier()),
            Scope {
                org_id: 1,
                outlet_id: Some(10),
                read_only: false
            }
        );
        let org = Actor::Organization { org_id: 7 };
        assert_eq!(Scope::home(&org).outlet_id, None);
    }

    #[test]
    fn test_org_account_cannot_run_register() {
        let org = Actor::Organization { org_id: 7 };
        assert!(org.permits(Action::ManageInvites));
        assert!(!org.permits(Action::OpenSession));
        assert!(org.employee().is_err());
    }

    #[test]
    fn test_authorize_rejects_with_forbidden() {
        let err = cashier().authorize(Action::VoidOrder).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn test_read_only_scope_rejects_writes() {
        let scope = Scope {
            org_id: 2,
            outlet_id: None,
            read_only: true,
        };
        assert!(scope.ensure_writable().is_err());
        assert!(scope.require_outlet().is_err());
        assert!(scope.contains(2, 55));
        assert!(!scope.contains(3, 55));
    }
}
