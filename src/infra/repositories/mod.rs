//! Repository layer - Data access abstraction
//!
//! Repositories borrow a connection (pool or open transaction) and are
//! handed out by [`RepoContext`](crate::infra::RepoContext).

mod base;
mod cash_repository;
mod catalog_repository;
pub(crate) mod entities;
mod inventory_repository;
mod invitation_repository;
mod order_repository;
mod organization_repository;
mod session_repository;

pub use base::{ScopedSelect, TenantScoped};
pub use cash_repository::CashRepository;
pub use catalog_repository::{
    IngredientRepository, NewIngredient, ProductRepository, RecipeRepository,
};
pub use inventory_repository::InventoryRepository;
pub use invitation_repository::{InvitationFilter, InvitationRepository};
pub use order_repository::{NewOrder, OrderRepository};
pub use organization_repository::{
    EmployeeChanges, EmployeeRepository, NewEmployee, OrganizationRepository, OutletRepository,
};
pub use session_repository::{NewSession, SessionRepository};
