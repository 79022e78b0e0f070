//! Generated video queries.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::debug;
use vgen_models::{VideoId, VideoRecord};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct VideosResponse {
    pub videos: Vec<VideoRecord>,
}

/// All stored videos, most recent first.
pub async fn list_videos(State(state): State<AppState>) -> Json<VideosResponse> {
    let videos = state.store.list().await;
    debug!(count = videos.len(), "Listing videos");
    Json(VideosResponse { videos })
}

/// A single stored video.
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<VideoRecord>> {
    if !VideoId::is_well_formed(&video_id) {
        return Err(ApiError::bad_request("malformed video id"));
    }

    state
        .store
        .get(&video_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("video {}", video_id)))
}
