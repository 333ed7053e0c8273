use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{error::ApiError, records::SyncBatch, state::AppState};

use super::{dto::SyncResponse, extractors::DriveToken, services};

pub fn sync_routes() -> Router<AppState> {
    Router::new().route("/sync", post(sync_data).get(restore_data))
}

/// POST /sync: overwrite the Drive snapshot with the uploaded batch.
#[instrument(skip(state, token, batch))]
pub async fn sync_data(
    State(state): State<AppState>,
    DriveToken(token): DriveToken,
    Json(batch): Json<SyncBatch>,
) -> Result<Json<SyncResponse>, ApiError> {
    batch.validate()?;

    let cfg = &state.config.drive;
    let file_id = services::upsert(
        state.drive.as_ref(),
        &token,
        &cfg.folder_name,
        &cfg.file_name,
        &batch,
    )
    .await?;

    info!(%file_id, records = batch.record_count(), "sync complete");
    Ok(Json(SyncResponse {
        status: "synced",
        file_id,
    }))
}

/// GET /sync: return the last uploaded snapshot.
#[instrument(skip(state, token))]
pub async fn restore_data(
    State(state): State<AppState>,
    DriveToken(token): DriveToken,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cfg = &state.config.drive;
    match services::fetch(state.drive.as_ref(), &token, &cfg.folder_name, &cfg.file_name).await? {
        Some(snapshot) => Ok(Json(snapshot)),
        None => Err(ApiError::NotFound("No backup found".into())),
    }
}
