//! `migrate` subcommand: apply, roll back, inspect or rebuild the schema.
//!
//! Connects without the automatic upgrade `serve` performs on startup.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(failed("connect to the database"))?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await.map_err(failed("apply migrations"))?;
            tracing::info!("schema is up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration()
                .await
                .map_err(failed("roll back the latest migration"))?;
            tracing::info!("latest migration rolled back");
        }
        MigrateAction::Status => {
            let status = db
                .migration_status()
                .await
                .map_err(failed("read migration status"))?;
            for (name, applied) in &status {
                let state = if *applied { "applied" } else { "pending" };
                println!("{:<48} {}", name, state);
            }
            let pending = status.iter().filter(|(_, applied)| !applied).count();
            tracing::info!(total = status.len(), pending, "migration status");
        }
        MigrateAction::Fresh => {
            tracing::warn!("dropping all tables, sessions and stock history included");
            db.fresh_migrations()
                .await
                .map_err(failed("rebuild the schema"))?;
            tracing::info!("schema rebuilt from scratch");
        }
    }

    Ok(())
}

/// Keep the database message; the CLI prints it on exit.
fn failed(step: &'static str) -> impl Fn(DbErr) -> AppError {
    move |e| AppError::internal(format!("failed to {}: {}", step, e))
}
