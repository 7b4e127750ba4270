//! API documentation: generated OpenAPI document and the static `/docs` bundle.

use std::str::FromStr;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::debug;
use utoipa::OpenApi;

use super::handlers::{self, AppState, HealthResponse, TestResponse};
use crate::error::{ApiError, Result};

/// Mount point of the static documentation bundle.
pub const DOCS_PREFIX: &str = "/docs";

/// Entry page of the documentation bundle.
pub const DOCS_INDEX: &str = "/docs/index.html";

/// OpenAPI description of the public API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Flavor Town API",
        version = "1.0",
        description = "A simple API for Flavor Town ice cream application"
    ),
    paths(handlers::test_endpoint, handlers::health),
    components(schemas(TestResponse, HealthResponse)),
    tags(
        (name = "test", description = "Connectivity check"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Output format of the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl FromStr for DocFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(ApiError::OpenApi(format!("unknown format: {other}"))),
        }
    }
}

/// Render the OpenAPI document as text.
pub fn render(format: DocFormat) -> Result<String> {
    let doc = ApiDoc::openapi();
    match format {
        DocFormat::Json => doc
            .to_pretty_json()
            .map_err(|e| ApiError::OpenApi(e.to_string())),
        DocFormat::Yaml => doc.to_yaml().map_err(|e| ApiError::OpenApi(e.to_string())),
    }
}

/// `GET /docs` - 301 to the bundle's entry page.
pub async fn redirect_to_index() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, DOCS_INDEX)],
    )
}

/// `GET /swagger.json`.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// `GET /swagger.yaml`.
pub async fn openapi_yaml() -> Response {
    match render(DocFormat::Yaml) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/yaml")], body).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// `GET /docs/*` - serve a file from the documentation directory.
///
/// The `/docs` prefix is stripped before the lookup; traversal outside the
/// directory is refused by `ServeDir`.
pub async fn serve_asset(State(state): State<AppState>, mut req: Request) -> Response {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let stripped = path_and_query
        .strip_prefix(DOCS_PREFIX)
        .unwrap_or(path_and_query);
    let stripped = if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{stripped}")
    };

    match Uri::from_str(&stripped) {
        Ok(uri) => *req.uri_mut() = uri,
        Err(e) => {
            debug!(error = %e, "unparseable docs path");
            return StatusCode::NOT_FOUND.into_response();
        }
    }

    match ServeDir::new(state.docs_dir.as_path()).oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_both_endpoints() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "Flavor Town API");
        assert!(doc.paths.paths.contains_key("/api/v1/test"));
        assert!(doc.paths.paths.contains_key("/api/v1/health"));
    }

    #[test]
    fn render_json_and_yaml() {
        let json = render(DocFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["info"]["version"], "1.0");

        let yaml = render(DocFormat::Yaml).unwrap();
        assert!(yaml.contains("/api/v1/health"));
    }

    #[test]
    fn doc_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<DocFormat>().unwrap(), DocFormat::Json);
        assert_eq!("yml".parse::<DocFormat>().unwrap(), DocFormat::Yaml);
        assert!("xml".parse::<DocFormat>().is_err());
    }
}
