use crate::error::AnalyzeError;
use crate::models::{AnalyzeRequest, HealthResponse, PlaylistSummary};
use crate::services::playlist_service;
use crate::utils::extract_youtube_playlist_id;
use crate::AppState;
use log::{error, info, warn};
use rocket::serde::json::{self, Json};
use rocket::{get, post, State};

#[post("/playlist/analyze", data = "<request>")]
pub async fn analyze_playlist(
    request: Result<Json<AnalyzeRequest>, json::Error<'_>>,
    state: &State<AppState>,
) -> Result<Json<PlaylistSummary>, AnalyzeError> {
    let request = request.map_err(|e| {
        warn!("Rejected analyze request: {e}");
        AnalyzeError::InvalidRequest(e.to_string())
    })?;

    let playlist_id = extract_youtube_playlist_id(&request.youtube_url).ok_or_else(|| {
        warn!("No playlist id in URL: {}", request.youtube_url);
        AnalyzeError::InvalidUrl
    })?;

    match playlist_service::analyze_playlist(state.youtube.as_ref(), &playlist_id).await {
        Ok(summary) => {
            info!(
                "Analyzed playlist {}: {} videos",
                summary.id, summary.video_count
            );
            Ok(Json(summary))
        }
        Err(e) => {
            error!("Failed to analyze playlist {playlist_id}: {e}");
            Err(e)
        }
    }
}

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
