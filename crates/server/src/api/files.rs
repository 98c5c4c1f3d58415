//! Catalog file API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use chartshelf_core::{
    parse_bulk, validate_bulk, BulkInputError, BulkValidation, CatalogEntry, CatalogError,
    CatalogStore, EntryFilter, FileStatus, PaginationState, PersistenceError, StatusCounts,
    StatusFilter, QUOTA_WARNING,
};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListFilesParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesResponse {
    /// Entries on the current page
    pub files: Vec<CatalogEntry>,
    pub pagination: PaginationState,
    /// Page numbers for the pagination controls
    pub pages: Vec<usize>,
    pub has_next: bool,
    pub has_previous: bool,
    /// Counts over the whole catalog, not just the filtered list
    pub counts: StatusCounts,
}

#[derive(Debug, Deserialize)]
pub struct AddFileRequest {
    #[serde(rename = "fileName")]
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub file: CatalogEntry,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub added: Vec<CatalogEntry>,
    pub duplicates: Vec<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportRejectedResponse {
    pub error: String,
    pub errors: Vec<BulkInputError>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

fn catalog_error_response(err: CatalogError) -> ApiError {
    let status = match &err {
        CatalogError::EmptyName | CatalogError::UnknownStatus(_) => StatusCode::BAD_REQUEST,
        CatalogError::DuplicateName(_) => StatusCode::CONFLICT,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    error_response(status, err)
}

/// User-facing text for the store's last failed save, if any.
fn save_warning(store: &CatalogStore) -> Option<String> {
    store.last_save_error().map(|err| match err {
        PersistenceError::QuotaExceeded => QUOTA_WARNING.to_string(),
        other => other.to_string(),
    })
}

fn import_message(added: usize, duplicates: usize) -> String {
    let mut message = format!("Added {} file(s)", added);
    if duplicates > 0 {
        message.push_str(&format!(", skipped {} duplicate(s)", duplicates));
    }
    message
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/files
///
/// Filter the catalog and return one page of it.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListFilesParams>,
) -> Result<Json<ListFilesResponse>, ApiError> {
    let status = match params.status.as_deref() {
        Some(raw) => raw
            .parse::<StatusFilter>()
            .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?,
        None => StatusFilter::All,
    };

    let filter = EntryFilter::new()
        .with_search(params.search.unwrap_or_default())
        .with_status(status);

    let (filtered, counts) = {
        let store = state.store();
        (store.filter(&filter), store.status_counts())
    };

    let mut paginator = state.paginator();
    paginator.initialize(filtered.len());
    if let Some(page) = params.page {
        if !paginator.set_page(page) {
            debug!(page, total_pages = paginator.total_pages(), "Ignoring out-of-range page");
        }
    }

    Ok(Json(ListFilesResponse {
        files: paginator.current_slice(&filtered).to_vec(),
        pagination: paginator.state(),
        pages: paginator.page_window(state.max_visible_pages()),
        has_next: paginator.has_next_page(),
        has_previous: paginator.has_previous_page(),
        counts,
    }))
}

/// POST /api/files
///
/// Add a single entry. The name is trimmed before the duplicate check.
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddFileRequest>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let name = request.file_name.trim();
    if name.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Please enter a file name"));
    }

    let mut store = state.store();
    let file = store.insert(name).map_err(catalog_error_response)?;
    info!(id = %file.id, name = %file.name, "File added");

    let message = format!("File '{}' added successfully!", file.name);
    Ok((
        StatusCode::CREATED,
        Json(FileResponse {
            file,
            message,
            warning: save_warning(&store),
        }),
    ))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CatalogEntry>, ApiError> {
    let store = state.store();
    let file = store.get_by_id(&id).map_err(catalog_error_response)?;
    Ok(Json(file))
}

/// PUT /api/files/{id}/status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<FileResponse>, ApiError> {
    let status = request
        .status
        .parse::<FileStatus>()
        .map_err(catalog_error_response)?;

    let mut store = state.store();
    let file = store.set_status(&id, status).map_err(catalog_error_response)?;

    let message = format!("Status updated to {}", file.status.label());
    Ok(Json(FileResponse {
        file,
        message,
        warning: save_warning(&store),
    }))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let mut store = state.store();
    let file = store.remove(&id).map_err(catalog_error_response)?;
    info!(id = %file.id, name = %file.name, "File deleted");

    let message = format!("File '{}' deleted", file.name);
    Ok(Json(FileResponse {
        file,
        message,
        warning: save_warning(&store),
    }))
}

/// DELETE /api/files
///
/// Remove every entry.
pub async fn clear_files(State(state): State<Arc<AppState>>) -> Json<SuccessResponse> {
    let mut store = state.store();
    let removed = store.len();
    store.clear();
    info!(removed, "Catalog cleared");

    Json(SuccessResponse {
        message: "All files cleared".to_string(),
        warning: save_warning(&store),
    })
}

/// POST /api/files/import
///
/// Validate pasted text, then add every name not already in the catalog.
pub async fn import_files(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BulkRequest>,
) -> Result<(StatusCode, Json<ImportResponse>), (StatusCode, Json<ImportRejectedResponse>)> {
    let validation = validate_bulk(&request.text);
    if !validation.valid {
        let error = validation
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ImportRejectedResponse {
                error,
                errors: validation.errors,
            }),
        ));
    }

    let mut store = state.store();
    let report = store.import(parse_bulk(&request.text));

    let message = import_message(report.added.len(), report.duplicates.len());
    let status = if report.added.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(ImportResponse {
            added: report.added,
            duplicates: report.duplicates,
            message,
            warning: save_warning(&store),
        }),
    ))
}

/// POST /api/files/validate
///
/// Check pasted text without importing it.
pub async fn validate_input(Json(request): Json<BulkRequest>) -> Json<BulkValidation> {
    Json(validate_bulk(&request.text))
}
