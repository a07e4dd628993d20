use crate::error::{AnalyzeError, AnalyzeResult};
use crate::models::{PlaylistSummary, VideoSummary};
use crate::services::youtube_client::{YouTubeApi, MAX_RESULTS_PER_CALL};
use crate::utils::parse_iso8601_duration_to_seconds;
use log::{debug, info, warn};

// Returns the video ids of a playlist in playlist order, walking every page.
pub async fn fetch_all_playlist_video_ids(
    api: &dyn YouTubeApi,
    playlist_id: &str,
) -> AnalyzeResult<Vec<String>> {
    let mut all_video_ids = Vec::new();
    let mut next_page_token: Option<String> = None;
    let mut page = 0;

    loop {
        page += 1;
        let response = api
            .list_playlist_items(playlist_id, next_page_token.as_deref())
            .await?;

        debug!(
            "Playlist {playlist_id}: page {page} returned {} items",
            response.video_ids.len()
        );

        if response.video_ids.is_empty() {
            break;
        }
        all_video_ids.extend(response.video_ids);

        match response.next_page_token {
            Some(token) => next_page_token = Some(token),
            None => break, // No more pages
        }
    }

    if all_video_ids.is_empty() {
        return Err(AnalyzeError::EmptyPlaylist(playlist_id.to_string()));
    }

    Ok(all_video_ids)
}

/// Fetches details for `video_ids` in batches of [`MAX_RESULTS_PER_CALL`],
/// returning the summaries in input order.
pub async fn fetch_video_summaries(
    api: &dyn YouTubeApi,
    video_ids: &[String],
) -> AnalyzeResult<Vec<VideoSummary>> {
    let mut videos = Vec::with_capacity(video_ids.len());

    for (batch_index, batch) in video_ids.chunks(MAX_RESULTS_PER_CALL).enumerate() {
        let details = api.get_videos_details(batch).await?;

        if details.len() < batch.len() {
            warn!(
                "Batch {}: YouTube returned {} of {} videos (deleted or private videos are skipped)",
                batch_index + 1,
                details.len(),
                batch.len()
            );
        }

        for item in details {
            let duration_sec = parse_iso8601_duration_to_seconds(&item.duration);
            videos.push(VideoSummary {
                id: item.id,
                title: item.title,
                description: item.description,
                thumbnail: item.thumbnail_url,
                duration: item.duration,
                duration_sec,
            });
        }
    }

    Ok(videos)
}

pub async fn analyze_playlist(
    api: &dyn YouTubeApi,
    playlist_id: &str,
) -> AnalyzeResult<PlaylistSummary> {
    info!("Analyzing playlist {playlist_id}");

    let metadata = api
        .get_playlist_metadata(playlist_id)
        .await?
        .ok_or_else(|| AnalyzeError::NotFound(playlist_id.to_string()))?;

    let video_ids = fetch_all_playlist_video_ids(api, playlist_id).await?;
    info!("Found {} videos in playlist {playlist_id}", video_ids.len());

    let videos = fetch_video_summaries(api, &video_ids).await?;
    let summary = PlaylistSummary::new(metadata, videos);

    info!(
        "Playlist {}: {} videos, total {}s",
        summary.id, summary.video_count, summary.total_duration_sec
    );
    Ok(summary)
}
