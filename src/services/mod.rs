//! Application services layer - Use cases and business logic.
//!
//! Every operation takes the caller's [`RequestContext`](crate::domain::RequestContext),
//! resolves its scope and runs multi-step changes inside one Unit of Work
//! transaction.

mod auth_service;
mod cash_service;
mod catalog_service;
pub mod container;
mod employee_service;
mod inventory_service;
mod invitation_service;
mod order_service;
mod outlet_service;
pub mod scope_service;
mod session_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{
    AuthService, Authenticator, Claims, SignupInput, SignupResponse, TokenResponse,
};
pub use cash_service::{CashManager, CashService};
pub use catalog_service::{CatalogManager, CatalogService, CreateIngredientInput};
pub use employee_service::{
    CreateEmployeeInput, EmployeeManager, EmployeeService, UpdateEmployeeInput,
};
pub use inventory_service::{ArrivalReceipt, CountItem, InventoryManager, InventoryService};
pub use invitation_service::{InvitationManager, InvitationService};
pub use order_service::{OrderDetails, OrderManager, OrderService, SellItem};
pub use outlet_service::{OutletManager, OutletService};
pub use scope_service::{resolve_scope, ScopeFacts};
pub use session_service::{CloseSessionInput, SessionManager, SessionService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use scope_service::MockScopeFacts;
