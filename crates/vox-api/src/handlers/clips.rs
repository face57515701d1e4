//! Clip handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use vox_models::ClipDescriptor;

use crate::client::ClientId;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Upper bound on clips served per request.
pub const MAX_CLIPS_PER_REQUEST: usize = 50;

#[derive(Debug, Deserialize)]
pub struct RandomClipsQuery {
    /// Number of clips wanted. Defaults to 1, clamped to 1..=50.
    pub count: Option<usize>,
}

impl RandomClipsQuery {
    pub fn effective_count(&self) -> usize {
        self.count.unwrap_or(1).clamp(1, MAX_CLIPS_PER_REQUEST)
    }
}

/// Signed URL response.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponse {
    pub url: String,
}

/// Random validated clips for the requesting client.
///
/// `GET /api/v1/locales/:locale/clips?count=N`
pub async fn get_random_clips(
    State(state): State<AppState>,
    client: ClientId,
    Path(locale): Path<String>,
    query: Result<Query<RandomClipsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ClipDescriptor>>> {
    let Query(query) = query?;
    let clips = state
        .supplier
        .get_random_clips(client.as_str(), &locale, query.effective_count())
        .await?;
    Ok(Json(clips))
}

/// Signed URL for a clip by id.
///
/// `GET /api/v1/clips/:clip_id/url`
pub async fn get_clip_url(
    State(state): State<AppState>,
    Path(clip_id): Path<String>,
) -> ApiResult<Json<UrlResponse>> {
    let url = state.supplier.get_clip_url(&clip_id).await?;
    Ok(Json(UrlResponse { url }))
}

#[derive(Debug, Deserialize)]
pub struct AvatarClipQuery {
    pub path: String,
}

/// Signed URL for an avatar clip.
///
/// `GET /api/v1/avatar-clips/url?path=KEY`
pub async fn get_avatar_clip_url(
    State(state): State<AppState>,
    query: Result<Query<AvatarClipQuery>, QueryRejection>,
) -> ApiResult<Json<UrlResponse>> {
    let Query(query) = query?;
    let key = query.path.trim();
    if key.is_empty() {
        return Err(ApiError::bad_request("path must not be empty"));
    }

    let url = state.supplier.get_avatar_clips_url(key).await?;
    Ok(Json(UrlResponse { url }))
}
