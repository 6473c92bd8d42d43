//! Tenants: organizations, their outlets and employees.

use serde::Serialize;

use super::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email_confirmed: bool,
}

/// A point of sale. The main outlet has no marker of its own; it is the
/// outlet an owner-role employee is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outlet {
    pub id: i64,
    pub org_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub pin_hash: String,
    pub role: Role,
    pub online: bool,
}
