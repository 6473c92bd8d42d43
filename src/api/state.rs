//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire every service over the database pool.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Arc::new(Services::from_connection(database.get_connection(), config));
        Self { services, database }
    }

    /// Create state with an injected service container (tests, embedding).
    pub fn new(services: Arc<dyn ServiceContainer>, database: Arc<Database>) -> Self {
        Self { services, database }
    }
}
