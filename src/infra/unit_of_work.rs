//! Unit of Work: repository access and transaction lifecycle.
//!
//! Every repository borrows a connection through [`RepoContext`]. Outside a
//! transaction that connection is the pool ([`ReadContext`]); inside one it
//! is the open transaction ([`TransactionContext`]), so every repository
//! call made from the closure commits or rolls back together.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction,
    IsolationLevel, TransactionTrait,
};
use std::future::Future;
use std::pin::Pin;

use super::repositories::{
    CashRepository, EmployeeRepository, IngredientRepository, InventoryRepository,
    InvitationRepository, OrderRepository, OrganizationRepository, OutletRepository,
    ProductRepository, RecipeRepository, SessionRepository,
};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Repository access bound to one connection.
pub struct RepoContext<'a, C> {
    conn: &'a C,
}

impl<C> Clone for RepoContext<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for RepoContext<'_, C> {}

/// Repositories reading straight from the pool.
pub type ReadContext<'a> = RepoContext<'a, DatabaseConnection>;

/// Repositories bound to an open transaction.
pub type TransactionContext<'a> = RepoContext<'a, DatabaseTransaction>;

impl<'a, C: ConnectionTrait> RepoContext<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub fn organizations(&self) -> OrganizationRepository<'a, C> {
        OrganizationRepository::new(self.conn)
    }

    pub fn outlets(&self) -> OutletRepository<'a, C> {
        OutletRepository::new(self.conn)
    }

    pub fn employees(&self) -> EmployeeRepository<'a, C> {
        EmployeeRepository::new(self.conn)
    }

    pub fn invitations(&self) -> InvitationRepository<'a, C> {
        InvitationRepository::new(self.conn)
    }

    pub fn sessions(&self) -> SessionRepository<'a, C> {
        SessionRepository::new(self.conn)
    }

    pub fn ingredients(&self) -> IngredientRepository<'a, C> {
        IngredientRepository::new(self.conn)
    }

    pub fn products(&self) -> ProductRepository<'a, C> {
        ProductRepository::new(self.conn)
    }

    pub fn recipes(&self) -> RecipeRepository<'a, C> {
        RecipeRepository::new(self.conn)
    }

    pub fn orders(&self) -> OrderRepository<'a, C> {
        OrderRepository::new(self.conn)
    }

    pub fn cash(&self) -> CashRepository<'a, C> {
        CashRepository::new(self.conn)
    }

    pub fn inventory(&self) -> InventoryRepository<'a, C> {
        InventoryRepository::new(self.conn)
    }
}

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// Services are tested against an in-memory database instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Repositories outside any transaction, for single-statement reads.
    fn reader(&self) -> ReadContext<'_>;

    /// Execute a closure within a ReadCommitted transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Execute a closure within a Serializable transaction.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin(&self, isolation: IsolationLevel) -> AppResult<DatabaseTransaction> {
        let txn = match self.db.get_database_backend() {
            // SQLite transactions are always serializable
            DatabaseBackend::Sqlite => self.db.begin().await,
            _ => {
                self.db
                    .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
                    .await
            }
        };
        txn.map_err(AppError::from)
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self.begin(isolation).await?;

        match f(RepoContext::new(&txn)).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn reader(&self) -> ReadContext<'_> {
        RepoContext::new(&self.db)
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}
