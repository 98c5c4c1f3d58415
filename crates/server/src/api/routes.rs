use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::{files, handlers, pagination};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.static_dir().to_path_buf();

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog entries
        .route(
            "/files",
            get(files::list_files)
                .post(files::create_file)
                .delete(files::clear_files),
        )
        .route("/files/import", post(files::import_files))
        .route("/files/validate", post(files::validate_input))
        .route("/files/{id}", get(files::get_file).delete(files::delete_file))
        .route("/files/{id}/status", put(files::update_status))
        // Paging through the current listing
        .route("/pagination", post(pagination::move_page))
        .with_state(state);

    // Serve the browser front end, falling back to index.html
    let index_path = static_dir.join("index.html");
    let serve_dir = ServeDir::new(&static_dir).fallback(ServeFile::new(index_path));

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http())
}
