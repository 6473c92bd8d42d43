//! Jobs command - maintenance jobs outside the HTTP server.
//!
//! ```bash
//! # Delete expired invitations once
//! retail-backoffice jobs sweep-invites
//!
//! # Keep sweeping on the configured interval
//! retail-backoffice jobs work
//! ```

use crate::cli::args::{JobsAction, JobsArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::jobs::{run_invite_sweep, sweep_once};
use crate::services::{ServiceContainer, Services};

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        JobsAction::SweepInvites => {
            let services = Services::from_connection(db.get_connection(), config);
            let deleted = sweep_once(services.invitations().as_ref()).await?;
            println!("Deleted {} expired invitation(s).", deleted);
        }
        JobsAction::Work => {
            let interval = config.invite_sweep_interval_secs;
            let services = Services::from_connection(db.get_connection(), config);
            tracing::info!("Job worker started. Press Ctrl+C to stop.");

            tokio::select! {
                _ = run_invite_sweep(services.invitations(), interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received shutdown signal, stopping worker...");
                }
            }

            tracing::info!("Job worker stopped.");
        }
    }

    Ok(())
}
