//! Service container: one place that wires every service to the Unit of Work.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CashManager, CashService, CatalogManager, CatalogService,
    EmployeeManager, EmployeeService, InventoryManager, InventoryService, InvitationManager,
    InvitationService, OrderManager, OrderService, OutletManager, OutletService, SessionManager,
    SessionService,
};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;
    fn invitations(&self) -> Arc<dyn InvitationService>;
    fn sessions(&self) -> Arc<dyn SessionService>;
    fn orders(&self) -> Arc<dyn OrderService>;
    fn inventory(&self) -> Arc<dyn InventoryService>;
    fn cash(&self) -> Arc<dyn CashService>;
    fn outlets(&self) -> Arc<dyn OutletService>;
    fn employees(&self) -> Arc<dyn EmployeeService>;
    fn catalog(&self) -> Arc<dyn CatalogService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth: Arc<dyn AuthService>,
    invitations: Arc<dyn InvitationService>,
    sessions: Arc<dyn SessionService>,
    orders: Arc<dyn OrderService>,
    inventory: Arc<dyn InventoryService>,
    cash: Arc<dyn CashService>,
    outlets: Arc<dyn OutletService>,
    employees: Arc<dyn EmployeeService>,
    catalog: Arc<dyn CatalogService>,
}

impl Services {
    /// Build every service over one shared connection pool.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let invite_ttl_hours = config.invite_ttl_hours;

        Self {
            auth: Arc::new(Authenticator::new(uow.clone(), config)),
            invitations: Arc::new(InvitationManager::new(uow.clone(), invite_ttl_hours)),
            sessions: Arc::new(SessionManager::new(uow.clone())),
            orders: Arc::new(OrderManager::new(uow.clone())),
            inventory: Arc::new(InventoryManager::new(uow.clone())),
            cash: Arc::new(CashManager::new(uow.clone())),
            outlets: Arc::new(OutletManager::new(uow.clone())),
            employees: Arc::new(EmployeeManager::new(uow.clone())),
            catalog: Arc::new(CatalogManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    fn invitations(&self) -> Arc<dyn InvitationService> {
        self.invitations.clone()
    }

    fn sessions(&self) -> Arc<dyn SessionService> {
        self.sessions.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.orders.clone()
    }

    fn inventory(&self) -> Arc<dyn InventoryService> {
        self.inventory.clone()
    }

    fn cash(&self) -> Arc<dyn CashService> {
        self.cash.clone()
    }

    fn outlets(&self) -> Arc<dyn OutletService> {
        self.outlets.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employees.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog.clone()
    }
}
