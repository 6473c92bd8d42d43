//! Scope resolution: which organization and outlet a request acts on.
//!
//! The actor's home scope is the starting point. Query-string overrides
//! are honoured only when the role allows them and the target checks out;
//! anything else is dropped and the home scope stands.

use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::{Action, RequestContext, Scope};
use crate::errors::AppResult;
use crate::infra::RepoContext;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Lookups the resolver needs from storage.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ScopeFacts: Send + Sync {
    /// Organization owning the outlet, if it exists.
    async fn outlet_org(&self, outlet_id: i64) -> AppResult<Option<i64>>;

    /// Whether `issuer` invited `affiliate` and the invitation was activated.
    async fn is_affiliate(&self, issuer: i64, affiliate: i64) -> AppResult<bool>;
}

#[async_trait]
impl<C: ConnectionTrait> ScopeFacts for RepoContext<'_, C> {
    async fn outlet_org(&self, outlet_id: i64) -> AppResult<Option<i64>> {
        let outlet = self.outlets().find_by_id(outlet_id).await?;
        Ok(outlet.map(|o| o.org_id))
    }

    async fn is_affiliate(&self, issuer: i64, affiliate: i64) -> AppResult<bool> {
        self.invitations().links(issuer, affiliate).await
    }
}

/// Effective scope of a request.
pub async fn resolve_scope<F>(ctx: &RequestContext, facts: &F) -> AppResult<Scope>
where
    F: ScopeFacts + ?Sized,
{
    let actor = &ctx.actor;
    let requested = ctx.scope_override;
    let mut scope = Scope::home(actor);

    if let Some(target_org) = requested.org_id.filter(|org| *org != scope.org_id) {
        if actor.permits(Action::OverrideOrganization)
            && facts.is_affiliate(scope.org_id, target_org).await?
        {
            // Affiliate data is visible, never writable
            scope = Scope {
                org_id: target_org,
                outlet_id: None,
                read_only: true,
            };
        } else {
            tracing::debug!(
                org_id = scope.org_id,
                target_org,
                "organization override ignored"
            );
        }
    }

    if let Some(target_outlet) = requested.outlet_id {
        if !actor.permits(Action::OverrideOutlet) {
            tracing::debug!(role = %actor.role(), target_outlet, "outlet override not permitted");
            return Ok(scope);
        }
        match facts.outlet_org(target_outlet).await? {
            Some(org) if org == scope.org_id => scope.outlet_id = Some(target_outlet),
            _ => tracing::debug!(
                org_id = scope.org_id,
                target_outlet,
                "outlet override outside organization ignored"
            ),
        }
    }

    Ok(scope)
}

/// Check the permission table, then resolve the scope.
pub async fn authorize_scope<F>(ctx: &RequestContext, action: Action, facts: &F) -> AppResult<Scope>
where
    F: ScopeFacts + ?Sized,
{
    ctx.actor.authorize(action)?;
    resolve_scope(ctx, facts).await
}

/// Like [`authorize_scope`] but the scope must accept writes.
pub async fn authorize_write<F>(ctx: &RequestContext, action: Action, facts: &F) -> AppResult<Scope>
where
    F: ScopeFacts + ?Sized,
{
    let scope = authorize_scope(ctx, action, facts).await?;
    scope.ensure_writable()?;
    Ok(scope)
}
