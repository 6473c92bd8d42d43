//! Employee roles and the permission table.
//!
//! Roles form a strict hierarchy `owner > director > admin > cashier`.
//! Every guarded operation is an [`Action`]; [`Action::allowed_roles`] is the
//! single place that decides which roles may perform it.

use serde::{Deserialize, Serialize};

use crate::config::{ROLE_ADMIN, ROLE_CASHIER, ROLE_DIRECTOR, ROLE_OWNER};
use crate::errors::AppError;

/// Employee role. Declaration order is the hierarchy (lowest first), so the
/// derived `Ord` compares by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Cashier,
    Admin,
    Director,
    Owner,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => ROLE_OWNER,
            Role::Director => ROLE_DIRECTOR,
            Role::Admin => ROLE_ADMIN,
            Role::Cashier => ROLE_CASHIER,
        }
    }

    /// Whether an actor holding `self` may create, edit or delete an
    /// employee holding `target`.
    ///
    /// Only strictly lower roles can be managed. The single exception is an
    /// owner editing their own record.
    pub fn can_manage(self, target: Role, is_self: bool) -> bool {
        if target < self {
            return true;
        }
        self == Role::Owner && target == Role::Owner && is_self
    }
}

impl std::str::FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_OWNER => Ok(Role::Owner),
            ROLE_DIRECTOR => Ok(Role::Director),
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_CASHIER => Ok(Role::Cashier),
            other => Err(AppError::validation(format!("Unknown role: {}", other))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guarded operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    OpenSession,
    CloseSession,
    ReadSessions,
    CreateOrder,
    SellProduct,
    VoidOrder,
    RecoverOrder,
    ReadOrders,
    RecordArrival,
    CountInventory,
    ReadInventory,
    RecordCashChange,
    ReadCashChanges,
    ManageInvites,
    ManageOutlets,
    ReadOutlets,
    ManageEmployees,
    ReadEmployees,
    ManageCatalog,
    ReadCatalog,
    OverrideOutlet,
    OverrideOrganization,
}

const EVERYONE: &[Role] = &[Role::Owner, Role::Director, Role::Admin, Role::Cashier];
const MANAGERS: &[Role] = &[Role::Owner, Role::Director, Role::Admin];
const DIRECTORS: &[Role] = &[Role::Owner, Role::Director];
const OWNER_ONLY: &[Role] = &[Role::Owner];

impl Action {
    /// Permission table: the roles allowed to perform each action.
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Action::OpenSession
            | Action::CloseSession
            | Action::ReadSessions
            | Action::CreateOrder
            | Action::SellProduct
            | Action::ReadOrders
            | Action::ReadInventory
            | Action::RecordCashChange
            | Action::ReadCashChanges
            | Action::ReadCatalog
            | Action::ReadOutlets => EVERYONE,

            Action::VoidOrder
            | Action::RecoverOrder
            | Action::RecordArrival
            | Action::CountInventory
            | Action::ManageEmployees
            | Action::ReadEmployees
            | Action::ManageCatalog => MANAGERS,

            Action::ManageOutlets | Action::OverrideOutlet => DIRECTORS,

            Action::ManageInvites | Action::OverrideOrganization => OWNER_ONLY,
        }
    }

    /// Actions that act on behalf of a specific employee and therefore
    /// cannot be performed with an organization-level token.
    pub fn requires_employee(self) -> bool {
        matches!(
            self,
            Action::OpenSession
                | Action::CloseSession
                | Action::CreateOrder
                | Action::SellProduct
                | Action::RecordCashChange
        )
    }

    pub fn permits(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}
