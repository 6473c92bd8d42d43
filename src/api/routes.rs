//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, routing::get, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::handlers::{
    auth_routes, cash_routes, catalog_routes, employee_auth_routes, employee_routes,
    inventory_routes, invite_routes, order_routes, outlet_routes, session_routes,
};
use super::middleware::auth_middleware;
use super::AppState;
use crate::config::API_BASE_PATH;
use crate::types::ApiResponse;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Everything except signup and login requires a bearer token
    let protected = employee_auth_routes()
        .merge(session_routes())
        .merge(order_routes())
        .merge(inventory_routes())
        .merge(cash_routes())
        .merge(invite_routes())
        .merge(outlet_routes())
        .merge(employee_routes())
        .merge(catalog_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes())
        .merge(protected);

    Router::new()
        .nest(API_BASE_PATH, api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check payload
#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    database: &'static str,
}

/// Health check endpoint with database connectivity check.
///
/// Ping failures are only logged; the response says `unhealthy` and nothing more.
async fn health(State(state): State<AppState>) -> (StatusCode, ApiResponse<HealthReport>) {
    match state.database.ping().await {
        Ok(()) => (
            StatusCode::OK,
            ApiResponse::success(HealthReport {
                status: "healthy",
                database: "healthy",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiResponse {
                    status: false,
                    data: HealthReport {
                        status: "degraded",
                        database: "unhealthy",
                    },
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::Request};
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    use super::*;
    use crate::infra::Database;
    use crate::services::MockServiceContainer;

    /// A container without expectations panics on any service call.
    fn router() -> Router {
        let database = Database::from_connection(DatabaseConnection::Disconnected);
        create_router(AppState::new(
            Arc::new(MockServiceContainer::new()),
            Arc::new(database),
        ))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_missing_token_rejected_before_services() {
        assert_eq!(status_of("/api/v1/outlets").await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_of("/api/v1/sessions.Last").await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_routes_live_under_base_path() {
        assert_eq!(status_of("/outlets").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of("/api/v1/unknown").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_degraded_without_database() {
        let request = Request::get("/api/v1/health").body(Body::empty()).unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": false,
                "data": {"status": "degraded", "database": "unhealthy"}
            })
        );
    }
}
