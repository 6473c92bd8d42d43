//! Retail back-office core.
//!
//! Multi-tenant back office for point-of-sale businesses: organizations
//! and their outlets, employee roles, cash-register work sessions, an
//! ingredient-level inventory ledger driven by sales, and affiliate
//! invitations that let one organization read another's data.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and rules
//! - **services**: Use cases, scope resolution and authorization
//! - **infra**: Database, migrations, repositories and the Unit of Work
//! - **api**: HTTP handlers, middleware, and routes
//! - **jobs**: Invitation expiry sweep
//! - **types**: Shared response types
//! - **utils**: Utility functions and helpers
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (and the invitation sweep on this instance)
//! retail-backoffice serve --maintenance
//!
//! # Run migrations
//! retail-backoffice migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Actor, Password, RequestContext, Role, Scope};
pub use errors::{AppError, AppResult};
