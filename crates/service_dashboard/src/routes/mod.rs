//! Route modules for the volatility dashboard
//!
//! This module contains endpoint group-specific routers:
//! - volatility: Realized volatility analytics endpoints
//! - dashboard: The browser-facing dashboard page
//! - health: Health check and monitoring endpoints

pub mod dashboard;
pub mod health;
pub mod volatility;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use adapter_marketstack::error::FeedError;
use adapter_marketstack::source::EodSource;
use vol_report::error::ReportError;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Price feed serving every analytics request
    pub source: Arc<dyn EodSource>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Arc<ServerConfig>, source: Arc<dyn EodSource>) -> Self {
        Self {
            config,
            source,
            start_time: std::time::Instant::now(),
        }
    }
}

/// JSON body returned for every API error
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable error kind
    pub error: String,
    /// Human-readable description
    pub message: String,
}

/// API error carrying an HTTP status and a JSON body
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.to_string(),
                message: message.into(),
            },
        }
    }

    /// 400 Bad Request, for rejected query parameters
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    /// 404 Not Found, for symbols the feed has no data for
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    /// 502 Bad Gateway, for upstream feed failures
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "upstream_error", message)
    }

    /// 503 Service Unavailable, for missing feed credentials
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", message)
    }

    /// 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    /// The HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::EmptyData { .. } => ApiError::not_found(err.to_string()),
            FeedError::MissingApiKey { .. } => ApiError::service_unavailable(err.to_string()),
            _ => ApiError::bad_gateway(err.to_string()),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InsufficientData { .. } => ApiError::bad_request(err.to_string()),
            _ => ApiError::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>, source: Arc<dyn EodSource>) -> Router {
    let state = AppState::new(config, source);

    Router::new()
        .merge(health::routes())
        .merge(volatility::routes())
        .merge(dashboard::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_marketstack::synthetic::GbmSource;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let config = Arc::new(ServerConfig::default());
        build_router(config, Arc::new(GbmSource::default()))
    }

    #[tokio::test]
    async fn test_build_router_creates_valid_router() {
        let router = test_router();

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Health endpoint should return 200
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_router_merges_all_route_groups() {
        let router = test_router();

        // Health routes
        let response = router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Analytics route served from the synthetic feed
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/volatility?symbol=AAPL&years=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Dashboard page
        let response = router
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let router = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/unknown/path")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_app_state_uptime() {
        let config = Arc::new(ServerConfig::default());
        let state = AppState::new(config, Arc::new(GbmSource::default()));

        // Wait a tiny bit
        std::thread::sleep(std::time::Duration::from_millis(10));

        let elapsed = state.start_time.elapsed();
        assert!(elapsed.as_millis() >= 10);
    }

    #[tokio::test]
    async fn test_app_state_config_access() {
        let mut config = ServerConfig::default();
        config.port = 9999;
        let config = Arc::new(config);
        let state = AppState::new(config.clone(), Arc::new(GbmSource::default()));

        assert_eq!(state.config.port, 9999);
        assert_eq!(state.source.name(), "synthetic-gbm");
    }

    #[test]
    fn test_feed_error_mapping() {
        let err = ApiError::from(FeedError::EmptyData {
            symbol: "ZZZZ".to_string(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::from(FeedError::MissingApiKey {
            var: "MARKETSTACK_API_KEY",
        });
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = ApiError::from(FeedError::Status {
            status: 500,
            body: "boom".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_report_error_mapping() {
        let err = ApiError::from(ReportError::InsufficientData { needed: 2, got: 1 });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(ReportError::Render("no font".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
