//! HTTP API handlers.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::Config;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "flavor-town-api";

/// API version reported by the test endpoint.
pub const API_VERSION: &str = "1.0.0";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directory the `/docs` bundle is served from.
    pub docs_dir: Arc<PathBuf>,
}

impl AppState {
    /// Create new app state.
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: Arc::new(docs_dir.into()),
        }
    }

    /// Create app state from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.docs_dir.clone())
    }
}

/// Test endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestResponse {
    /// Greeting.
    #[schema(example = "Flavor Town API is running! 🍦")]
    pub message: &'static str,
    /// Always "success".
    #[schema(example = "success")]
    pub status: &'static str,
    /// API version.
    #[schema(example = "1.0.0")]
    pub version: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy".
    #[schema(example = "healthy")]
    pub status: &'static str,
    /// Service name.
    #[schema(example = "flavor-town-api")]
    pub service: &'static str,
}

/// Test endpoint - verifies the API is reachable.
#[utoipa::path(
    get,
    path = "/api/v1/test",
    tag = "test",
    responses(
        (status = 200, description = "API is running", body = TestResponse)
    )
)]
pub async fn test_endpoint() -> Json<TestResponse> {
    Json(TestResponse {
        message: "Flavor Town API is running! 🍦",
        status: "success",
        version: API_VERSION,
    })
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}
