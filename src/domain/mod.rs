//! Domain layer - Core business entities and rules
//!
//! Pure types and transition functions; nothing here touches the database.

pub mod cash;
pub mod context;
pub mod inventory;
pub mod invitation;
pub mod order;
pub mod organization;
pub mod password;
pub mod role;
pub mod session;

pub use cash::{CashChange, CashReason};
pub use context::{Actor, DateRange, EmployeeActor, RequestContext, Scope, ScopeOverride};
pub use inventory::{
    round_money, round_quantity, ArrivalItem, CountOutcome, Ingredient, InventoryHistory,
    InventoryLine, MeasureUnit, Product, RecipeItem,
};
pub use invitation::{Invitation, InvitationState};
pub use order::{OrderInfo, OrderLine, OrderState, PayType, StockDirection};
pub use organization::{Employee, Organization, Outlet};
pub use password::Password;
pub use role::{Action, Role};
pub use session::{SessionAction, SessionClosing, SessionState, WorkSession};
