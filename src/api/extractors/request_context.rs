//! Builds a [`RequestContext`] from the authenticated actor and the
//! `org_id` / `outlet_id` query parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::domain::{Actor, RequestContext, ScopeOverride};
use crate::errors::AppError;

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .extensions
            .get::<Actor>()
            .copied()
            .ok_or(AppError::Unauthorized)?;

        let Query(scope_override) = Query::<ScopeOverride>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(RequestContext::new(actor).with_override(scope_override))
    }
}
