//! Router configuration for the filedrop HTTP surface.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{download_file, upload_file, AppState};
use super::middleware::{create_cors_layer, download_rate_limit, security_headers};

/// OpenAPI documentation for the service.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::handlers::file::upload_file,
        crate::web::handlers::file::download_file
    ),
    components(schemas(crate::web::dto::UploadResponse)),
    tags(
        (name = "files", description = "File upload and download")
    )
)]
struct ApiDoc;

/// Create the main API router.
///
/// The rate limit middleware wraps only the download route; uploads and
/// the liveness endpoint are not limited.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let limiter = app_state.limiter.clone();

    // Multipart framing adds overhead on top of the payload itself, so the
    // body limit sits above the upload ceiling; the handler enforces the
    // exact ceiling.
    let body_limit = (app_state.max_upload_size as usize).saturating_mul(2);

    let download_routes = Router::new()
        .route("/files/:filename", get(download_file))
        .layer(middleware::from_fn(move |req, next| {
            let limiter = limiter.clone();
            download_rate_limit(limiter, req, next)
        }));

    let upload_routes = Router::new()
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/", get(service_root))
        .merge(upload_routes)
        .merge(download_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Liveness handler.
async fn service_root() -> &'static str {
    "File Upload Service Running"
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Create a router serving the generated OpenAPI document.
pub fn create_openapi_router() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// OpenAPI document handler.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }

    #[test]
    fn test_openapi_document_lists_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/upload"));
        assert!(doc.paths.paths.contains_key("/files/{filename}"));
    }
}
