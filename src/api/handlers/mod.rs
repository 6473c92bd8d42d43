//! HTTP request handlers.

pub mod auth_handler;
pub mod cash_handler;
pub mod catalog_handler;
pub mod employee_handler;
pub mod invite_handler;
pub mod inventory_handler;
pub mod order_handler;
pub mod outlet_handler;
pub mod session_handler;

pub use auth_handler::{auth_routes, employee_auth_routes};
pub use cash_handler::cash_routes;
pub use catalog_handler::catalog_routes;
pub use employee_handler::employee_routes;
pub use invite_handler::invite_routes;
pub use inventory_handler::inventory_routes;
pub use order_handler::order_routes;
pub use outlet_handler::outlet_routes;
pub use session_handler::session_routes;
