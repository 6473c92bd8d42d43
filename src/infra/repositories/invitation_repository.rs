//! Invitation storage.
//!
//! Pending rows hold a code and an expiry; activation nulls both and records
//! the affiliate organization.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;

use super::entities::invitation;
use crate::domain::Invitation;
use crate::errors::AppResult;

/// Which invitations a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationFilter {
    #[default]
    All,
    Activated,
    /// Pending and not yet expired
    NotActivated,
}

pub struct InvitationRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> InvitationRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Any row currently holding `code`, live or expired.
    pub async fn code_taken(&self, code: &str) -> AppResult<bool> {
        let count = invitation::Entity::find()
            .filter(invitation::Column::Code.eq(code))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    /// Pending invitation with `code` that has not expired at `now`.
    pub async fn find_live_by_code(&self, code: &str, now: i64) -> AppResult<Option<Invitation>> {
        let model = invitation::Entity::find()
            .filter(invitation::Column::Code.eq(code))
            .filter(invitation::Column::AffiliateOrgId.is_null())
            .filter(invitation::Column::ExpiresAt.gt(now))
            .one(self.conn)
            .await?;
        Ok(model.map(Invitation::from))
    }

    pub async fn count_pending(&self, org_id: i64, now: i64) -> AppResult<u64> {
        let count = invitation::Entity::find()
            .filter(invitation::Column::OrgId.eq(org_id))
            .filter(invitation::Column::AffiliateOrgId.is_null())
            .filter(invitation::Column::ExpiresAt.gt(now))
            .count(self.conn)
            .await?;
        Ok(count)
    }

    /// Whether `org_id` joined through someone else's invitation.
    pub async fn is_affiliate(&self, org_id: i64) -> AppResult<bool> {
        let count = invitation::Entity::find()
            .filter(invitation::Column::AffiliateOrgId.eq(org_id))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    /// Whether an activated invitation links `issuer` to `affiliate`.
    pub async fn links(&self, issuer: i64, affiliate: i64) -> AppResult<bool> {
        let count = invitation::Entity::find()
            .filter(invitation::Column::OrgId.eq(issuer))
            .filter(invitation::Column::AffiliateOrgId.eq(affiliate))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(
        &self,
        org_id: i64,
        code: String,
        expires_at: i64,
        created_at: i64,
    ) -> AppResult<Invitation> {
        let model = invitation::ActiveModel {
            org_id: Set(org_id),
            code: Set(Some(code)),
            expires_at: Set(Some(expires_at)),
            affiliate_org_id: Set(None),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }

    /// Consume a pending invitation. Returns false if it was no longer pending.
    pub async fn activate(&self, id: i64, affiliate_org_id: i64) -> AppResult<bool> {
        let result = invitation::Entity::update_many()
            .col_expr(invitation::Column::AffiliateOrgId, Expr::value(affiliate_org_id))
            .col_expr(invitation::Column::Code, Expr::value(Option::<String>::None))
            .col_expr(invitation::Column::ExpiresAt, Expr::value(Option::<i64>::None))
            .filter(invitation::Column::Id.eq(id))
            .filter(invitation::Column::AffiliateOrgId.is_null())
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected == 1)
    }

    pub async fn list(
        &self,
        org_id: i64,
        filter: InvitationFilter,
        now: i64,
    ) -> AppResult<Vec<Invitation>> {
        let query = invitation::Entity::find().filter(invitation::Column::OrgId.eq(org_id));
        let query = match filter {
            InvitationFilter::All => query,
            InvitationFilter::Activated => {
                query.filter(invitation::Column::AffiliateOrgId.is_not_null())
            }
            InvitationFilter::NotActivated => query
                .filter(invitation::Column::AffiliateOrgId.is_null())
                .filter(invitation::Column::ExpiresAt.gt(now)),
        };

        let models = query
            .order_by_desc(invitation::Column::CreatedAt)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(Invitation::from).collect())
    }

    /// Delete one of `org_id`'s invitations. Returns false if none matched.
    pub async fn delete(&self, org_id: i64, id: i64) -> AppResult<bool> {
        let result = invitation::Entity::delete_many()
            .filter(invitation::Column::Id.eq(id))
            .filter(invitation::Column::OrgId.eq(org_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Remove pending invitations that expired before `now`.
    pub async fn delete_expired(&self, now: i64) -> AppResult<u64> {
        let result = invitation::Entity::delete_many()
            .filter(invitation::Column::AffiliateOrgId.is_null())
            .filter(invitation::Column::ExpiresAt.lt(now))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}
