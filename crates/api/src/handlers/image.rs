//! Handler for model picture uploads.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use sims_core::error::CoreError;
use sims_core::types::DbId;
use sims_core::upload::{normalize_extension, sniff_image, stored_file_name};
use sims_db::repositories::ModelRepo;
use sims_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// URL prefix the images directory is served under.
pub const IMAGES_URL_PREFIX: &str = "/images";

/// Response body for `POST /uploadImage`.
#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    /// Stored file name, also written to `models.picture_id`.
    pub picture_id: String,
    pub picture_url: String,
}

/// POST /uploadImage
///
/// Accepts a multipart form with a required `image` file field and the `id`
/// of the model it belongs to. The file is stored under a random name in the
/// images directory and replaces any previous picture of the model.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadImageResponse>> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut model_id: Option<DbId> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some((filename, data.to_vec()));
            }
            "id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let id = text
                    .trim()
                    .parse()
                    .map_err(|_| AppError::BadRequest(format!("Invalid model id '{text}'")))?;
                model_id = Some(id);
            }
            _ => {}
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'image' field".into()))?;
    let model_id =
        model_id.ok_or_else(|| AppError::BadRequest("Missing required 'id' field".into()))?;

    let ext = normalize_extension(&filename)?;
    sniff_image(&data, &ext)?;

    if ModelRepo::find_by_id(&state.pool, model_id).await?.is_none() {
        return Err(model_not_found(model_id));
    }

    let images_dir = &state.config.images_dir;
    tokio::fs::create_dir_all(images_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let picture_id = stored_file_name(&ext);
    let file_path = images_dir.join(&picture_id);
    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let replaced = match swap_picture(&state.pool, model_id, &picture_id).await {
        Ok(replaced) => replaced,
        Err(e) => {
            remove_image(&file_path, "unrecorded upload").await;
            return Err(e);
        }
    };

    if let Some(old) = replaced {
        remove_image(&images_dir.join(&old), "replaced picture").await;
    }

    tracing::info!(
        model_id,
        picture_id = %picture_id,
        size_bytes = data.len(),
        user_id = auth.user_id,
        "Model picture stored"
    );

    Ok(Json(UploadImageResponse {
        picture_url: format!("{IMAGES_URL_PREFIX}/{picture_id}"),
        picture_id,
    }))
}

fn model_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Model", id })
}

/// Point the model at `picture_id` and return the picture it replaced.
///
/// Concurrent uploads for one model each swap against the value they read,
/// so every replaced file is handed back to exactly one caller.
async fn swap_picture(
    pool: &DbPool,
    model_id: DbId,
    picture_id: &str,
) -> AppResult<Option<String>> {
    loop {
        let current = ModelRepo::find_by_id(pool, model_id)
            .await?
            .ok_or_else(|| model_not_found(model_id))?
            .picture_id;

        if ModelRepo::replace_picture(pool, model_id, current.as_deref(), picture_id).await? {
            return Ok(current);
        }
        tracing::debug!(model_id, "Picture changed underneath upload, retrying");
    }
}

async fn remove_image(path: &Path, what: &str) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(file = %path.display(), error = %e, "Failed to remove {what}");
    }
}
