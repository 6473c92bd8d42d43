//! Periodic removal of expired, never-activated invitations.
//!
//! Runs on one designated maintenance instance only. The delete predicate
//! is idempotent, so an overlapping run elsewhere only repeats work.

use std::sync::Arc;
use std::time::Duration;

use crate::errors::AppResult;
use crate::services::InvitationService;
use crate::utils::now_millis;

/// One sweep pass. Returns the number of deleted invitations.
pub async fn sweep_once(invitations: &dyn InvitationService) -> AppResult<u64> {
    let deleted = invitations.sweep_expired(now_millis()).await?;
    tracing::debug!(deleted, "invitation sweep finished");
    Ok(deleted)
}

/// Sweep every `interval_secs` until the task is dropped. Failures are
/// logged and retried on the next tick.
pub async fn run_invite_sweep(invitations: Arc<dyn InvitationService>, interval_secs: u64) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    tracing::info!(interval_secs, "invitation sweep started");
    loop {
        ticker.tick().await;
        if let Err(e) = sweep_once(invitations.as_ref()).await {
            tracing::error!(error = %e, "invitation sweep failed");
        }
    }
}
