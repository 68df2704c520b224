//! Route definitions for model pictures.

use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use tower_http::services::ServeDir;

use crate::handlers::image::{self, IMAGES_URL_PREFIX};
use crate::state::AppState;

/// ```text
/// POST /uploadImage     -> upload (requires auth, body capped at `max_upload_bytes`)
/// GET  /images/{file}   -> static files from `images_dir` (public)
/// ```
pub fn router(images_dir: &Path, max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/uploadImage",
            post(image::upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .nest_service(IMAGES_URL_PREFIX, ServeDir::new(images_dir))
}
