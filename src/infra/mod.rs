//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories over SeaORM entities
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use unit_of_work::{
    Persistence, ReadContext, RepoContext, TransactionContext, TxFuture, UnitOfWork,
};
