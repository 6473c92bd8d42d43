//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Every tenant-owned table implements [`TenantScoped`](super::TenantScoped)
//! in `repositories::base`.

pub mod cash_change;
pub mod employee;
pub mod ingredient;
pub mod inventory_history;
pub mod inventory_line;
pub mod invitation;
pub mod order_info;
pub mod order_line;
pub mod organization;
pub mod outlet;
pub mod product;
pub mod product_ingredient;
pub mod work_session;
