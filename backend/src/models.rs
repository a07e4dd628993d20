use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub youtube_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub duration: String, // ISO8601, as delivered by YouTube
    pub duration_sec: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub videos: Vec<VideoSummary>,
    pub total_duration_sec: u64,
    pub video_count: usize,
    pub average_duration_sec: u64,
}

impl PlaylistSummary {
    pub fn new(metadata: PlaylistMetadata, videos: Vec<VideoSummary>) -> Self {
        let total_duration_sec = videos
            .iter()
            .fold(0u64, |total, video| total.saturating_add(video.duration_sec));
        let video_count = videos.len();
        let average_duration_sec = match video_count {
            0 => 0,
            count => total_duration_sec / count as u64,
        };

        PlaylistSummary {
            id: metadata.id,
            title: metadata.title,
            description: metadata.description,
            thumbnail: metadata.thumbnail_url,
            videos,
            total_duration_sec,
            video_count,
            average_duration_sec,
        }
    }
}

/// One page of `playlistItems`.
#[derive(Debug, Clone, Default)]
pub struct PlaylistItemsPage {
    pub video_ids: Vec<String>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
