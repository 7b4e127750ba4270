//! HTTP API route definitions.

use axum::{
    handler::Handler,
    http::StatusCode,
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

use super::cors::cors;
use super::docs::{openapi_json, openapi_yaml, redirect_to_index, serve_asset};
use super::handlers::{health, test_endpoint, AppState};
use crate::metrics::track_requests;

/// Wrong method on a known path is answered like an unknown path.
async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// `GET` route whose other methods fall through to 404 instead of 405.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(not_found)
}

/// Routes under `/api/v1`.
fn api_v1() -> Router<AppState> {
    Router::new()
        .route("/test", get_only(test_endpoint))
        .route("/health", get_only(health))
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_v1())
        // Documentation
        .route("/docs", get_only(redirect_to_index))
        .route("/docs/*path", get_only(serve_asset))
        .route("/swagger.json", get_only(openapi_json))
        .route("/swagger.yaml", get_only(openapi_yaml))
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tower::ServiceExt;

    use crate::api::cors::{ALLOW_HEADERS, ALLOW_METHODS};

    fn app() -> Router {
        let docs = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/docs");
        create_router(AppState::new(docs))
    }

    async fn send(method: Method, uri: &str) -> axum::response::Response {
        app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn assert_cors(response: &axum::response::Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
    }

    #[tokio::test]
    async fn test_endpoint_returns_fixed_payload() {
        let response = send(Method::GET, "/api/v1/test?ignored=1").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(
            body_string(response).await,
            r#"{"message":"Flavor Town API is running! 🍦","status":"success","version":"1.0.0"}"#
        );
    }

    #[tokio::test]
    async fn health_endpoint_returns_fixed_payload() {
        let response = send(Method::GET, "/api/v1/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(
            body_string(response).await,
            r#"{"status":"healthy","service":"flavor-town-api"}"#
        );
    }

    #[tokio::test]
    async fn repeated_calls_are_byte_identical() {
        let first = body_string(send(Method::GET, "/api/v1/health").await).await;
        let second = body_string(send(Method::GET, "/api/v1/health").await).await;
        assert_eq!(first, second);

        let first = body_string(send(Method::GET, "/api/v1/test").await).await;
        let second = body_string(send(Method::GET, "/api/v1/test").await).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn options_short_circuits_with_204_on_any_path() {
        for uri in ["/api/v1/test", "/api/v1/health", "/docs", "/no/such/route"] {
            let response = send(Method::OPTIONS, uri).await;

            assert_eq!(response.status(), StatusCode::NO_CONTENT, "{uri}");
            assert_cors(&response);
            assert!(body_string(response).await.is_empty());
        }
    }

    #[tokio::test]
    async fn unmatched_route_is_404_with_cors_headers() {
        let response = send(Method::GET, "/api/v2/test").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors(&response);
    }

    #[tokio::test]
    async fn wrong_method_is_404_with_cors_headers() {
        for (method, uri) in [
            (Method::POST, "/api/v1/health"),
            (Method::DELETE, "/api/v1/test"),
            (Method::POST, "/docs"),
            (Method::PUT, "/docs/index.html"),
            (Method::POST, "/swagger.json"),
        ] {
            let response = send(method.clone(), uri).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
            assert_cors(&response);
        }
    }

    #[tokio::test]
    async fn docs_redirects_to_index() {
        let response = send(Method::GET, "/docs").await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "/docs/index.html");
        assert_cors(&response);
    }

    #[tokio::test]
    async fn docs_serves_static_files() {
        let response = send(Method::GET, "/docs/index.html").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert!(body_string(response).await.contains("Flavor Town API"));
    }

    #[tokio::test]
    async fn docs_missing_file_is_404() {
        let response = send(Method::GET, "/docs/missing.js").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors(&response);
    }

    #[tokio::test]
    async fn docs_refuses_path_traversal() {
        let response = send(Method::GET, "/docs/../../Cargo.toml").await;

        assert_ne!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn swagger_json_describes_the_api() {
        let response = send(Method::GET, "/swagger.json").await;

        assert_eq!(response.status(), StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(doc["info"]["title"], "Flavor Town API");
        assert!(doc["paths"]["/api/v1/test"]["get"].is_object());
        assert!(doc["paths"]["/api/v1/health"]["get"].is_object());
    }

    #[tokio::test]
    async fn swagger_yaml_is_served() {
        let response = send(Method::GET, "/swagger.yaml").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/yaml");
        assert!(body_string(response).await.contains("Flavor Town API"));
    }
}
