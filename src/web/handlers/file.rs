//! File upload/download handlers.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::Response,
    Json,
};
use std::sync::Arc;
use utoipa;

use crate::storage::is_allowed_content_type;
use crate::web::dto::UploadResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Build a Content-Disposition header value for a download.
///
/// Control characters are stripped and quotes/backslashes replaced so a
/// stored name can never smuggle extra headers into the response;
/// non-ASCII names carry an RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    let needs_encoding = !filename.is_ascii()
        || filename
            .chars()
            .any(|c| c.is_control() || c == '"' || c == '\\');

    if !needs_encoding {
        return format!("attachment; filename=\"{filename}\"");
    }

    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            c => c,
        })
        .collect();

    let encoded = urlencoding::encode(filename);

    format!("attachment; filename=\"{sanitized}\"; filename*=UTF-8''{encoded}")
}

/// POST /upload - Store an uploaded file.
///
/// Request body: multipart/form-data with a "file" field. The declared
/// content type must be on the allow-list and the size must be within the
/// configured ceiling; every check runs before any byte reaches disk, so a
/// rejected upload leaves nothing behind.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "files",
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No file part or invalid multipart data"),
        (status = 413, description = "File exceeds the size limit"),
        (status = 415, description = "Content type not on the allow-list")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let content_type = field.content_type().unwrap_or_default().to_string();

        if !is_allowed_content_type(&content_type) {
            return Err(ApiError::unsupported_type(format!(
                "Invalid file type: {content_type}"
            )));
        }

        let data = field.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read file content: {}", e);
            ApiError::bad_request("Failed to read file")
        })?;

        upload = Some((filename, data.to_vec()));
        break;
    }

    let Some((filename, content)) = upload else {
        return Err(ApiError::missing_file("No file uploaded"));
    };

    if content.len() as u64 > state.max_upload_size {
        return Err(ApiError::payload_too_large(format!(
            "File too large (max {} bytes)",
            state.max_upload_size
        )));
    }

    let stored_name = state.store.save(&content, &filename)?;

    tracing::info!(filename = %stored_name, size = content.len(), "File stored");

    Ok(Json(UploadResponse::new(stored_name)))
}

/// GET /files/{filename} - Download a stored file.
///
/// The rate limit check runs in middleware before this handler. The
/// filename is resolved against the storage root, checked for existence,
/// and the bytes are returned with attachment disposition.
#[utoipa::path(
    get,
    path = "/files/{filename}",
    tag = "files",
    params(
        ("filename" = String, Path, description = "Stored filename")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 400, description = "Filename resolves outside the storage root"),
        (status = 404, description = "File not found"),
        (status = 429, description = "Download rate limit exceeded"),
        (status = 500, description = "Transfer failed")
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let path = state.store.resolve(&filename).map_err(|e| {
        tracing::warn!(filename = %filename, "Rejected download path: {}", e);
        ApiError::invalid_path("Invalid path")
    })?;

    if !path.is_file() {
        return Err(ApiError::not_found("File not found"));
    }

    let content = state.store.load(&filename).map_err(|e| {
        tracing::error!(filename = %filename, "Failed to read stored file: {}", e);
        ApiError::transfer_failed("Failed to download file")
    })?;

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&filename),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}
