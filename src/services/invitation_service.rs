//! Affiliate invitations: issuing, listing, revoking and the expiry sweep.
//!
//! Activation is part of organization signup (see `auth_service`).

use async_trait::async_trait;
use std::sync::Arc;

use super::scope_service::authorize_write;
use crate::config::INVITE_CODE_MAX_ATTEMPTS;
use crate::domain::invitation::{ensure_may_issue, generate_code};
use crate::domain::{Action, Invitation, RequestContext};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::InvitationFilter;
use crate::infra::UnitOfWork;
use crate::utils::{hours_to_millis, now_millis};

#[async_trait]
pub trait InvitationService: Send + Sync {
    async fn create(&self, ctx: &RequestContext) -> AppResult<Invitation>;

    async fn list(&self, ctx: &RequestContext, filter: InvitationFilter)
        -> AppResult<Vec<Invitation>>;

    async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()>;

    /// Delete pending invitations that expired before `now`. Idempotent.
    async fn sweep_expired(&self, now: i64) -> AppResult<u64>;
}

pub struct InvitationManager<U: UnitOfWork> {
    uow: Arc<U>,
    ttl_millis: i64,
}

impl<U: UnitOfWork> InvitationManager<U> {
    pub fn new(uow: Arc<U>, ttl_hours: i64) -> Self {
        Self {
            uow,
            ttl_millis: hours_to_millis(ttl_hours),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> InvitationService for InvitationManager<U> {
    async fn create(&self, ctx: &RequestContext) -> AppResult<Invitation> {
        let scope = authorize_write(ctx, Action::ManageInvites, &self.uow.reader()).await?;
        let org_id = scope.org_id;
        let now = now_millis();
        let expires_at = now + self.ttl_millis;

        let invitation = self
            .uow
            .transaction_serializable(move |tx| {
                Box::pin(async move {
                    let invitations = tx.invitations();
                    let pending = invitations.count_pending(org_id, now).await?;
                    ensure_may_issue(invitations.is_affiliate(org_id).await?, pending)?;

                    for _ in 0..INVITE_CODE_MAX_ATTEMPTS {
                        let code = generate_code();
                        if !invitations.code_taken(&code).await? {
                            return invitations.create(org_id, code, expires_at, now).await;
                        }
                    }
                    Err(AppError::internal("could not draw an unused invitation code"))
                })
            })
            .await?;

        tracing::info!(org_id, invitation_id = invitation.id, "invitation issued");
        Ok(invitation)
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        filter: InvitationFilter,
    ) -> AppResult<Vec<Invitation>> {
        // Always the caller's own organization, even under an affiliate view
        ctx.actor.authorize(Action::ManageInvites)?;
        self.uow
            .reader()
            .invitations()
            .list(ctx.actor.org_id(), filter, now_millis())
            .await
    }

    async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        ctx.actor.authorize(Action::ManageInvites)?;
        let org_id = ctx.actor.org_id();
        if !self.uow.reader().invitations().delete(org_id, id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(org_id, invitation_id = id, "invitation deleted");
        Ok(())
    }

    async fn sweep_expired(&self, now: i64) -> AppResult<u64> {
        let removed = self.uow.reader().invitations().delete_expired(now).await?;
        if removed > 0 {
            tracing::info!(removed, "expired invitations swept");
        }
        Ok(removed)
    }
}
