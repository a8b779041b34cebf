//! Browser-facing dashboard page
//!
//! Serves a single static page that drives the analytics endpoints with
//! fetch calls. The page is embedded at compile time so the binary has no
//! runtime asset directory to locate.

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use super::AppState;

/// The dashboard page, embedded at compile time
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Build the dashboard routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler))
}

/// GET / - The dashboard page
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use adapter_marketstack::synthetic::GbmSource;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(
            Arc::new(ServerConfig::default()),
            Arc::new(GbmSource::default()),
        )
    }

    #[tokio::test]
    async fn test_index_returns_200() {
        let router = routes().with_state(create_test_state());

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_is_html() {
        let router = routes().with_state(create_test_state());

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let page = std::str::from_utf8(&body).unwrap();

        assert!(page.contains("<!DOCTYPE html>"));
        assert!(page.contains("Realized Volatility"));
        assert!(page.contains("/api/v1/volatility"));
    }
}
