use axum::{Json, extract::State};
use mission_board_app::domain::StorageId;
use serde::Deserialize;

use crate::{ApiError, AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonStorageArgs {
    storage_id: String,
}

pub async fn generate_upload_url(State(state): State<AppState>) -> Result<Json<String>, ApiError> {
    Ok(Json(state.app.file_storage.generate_upload_url()?))
}

pub async fn get_avatar_url(
    State(state): State<AppState>,
    Json(args): Json<JsonStorageArgs>,
) -> Json<Option<String>> {
    Json(state.app.file_storage.get_url(&StorageId(args.storage_id)))
}
