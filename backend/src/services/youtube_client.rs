use crate::models::{PlaylistItemsPage, PlaylistMetadata, VideoDetails};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Upper bound YouTube accepts for `maxResults` and for ids per `videos` call.
pub const MAX_RESULTS_PER_CALL: usize = 50;

#[derive(Debug, Error)]
pub enum YouTubeApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("status {status}: {message}")]
    Api { status: u16, message: String },
}

/// The three YouTube Data API operations the playlist pipeline needs.
#[async_trait]
pub trait YouTubeApi: Send + Sync {
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, YouTubeApiError>;

    /// At most [`MAX_RESULTS_PER_CALL`] ids per call.
    async fn get_videos_details(
        &self,
        video_ids: &[String],
    ) -> Result<Vec<VideoDetails>, YouTubeApiError>;

    async fn get_playlist_metadata(
        &self,
        playlist_id: &str,
    ) -> Result<Option<PlaylistMetadata>, YouTubeApiError>;
}

// Documentation: https://developers.google.com/youtube/v3/docs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemResource {
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    id: String,
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    content_details: VideoContentDetails,
}

#[derive(Debug, Default, Deserialize)]
struct VideoContentDetails {
    #[serde(default)]
    duration: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistResource {
    id: String,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

impl Snippet {
    fn thumbnail_url(&self) -> String {
        self.thumbnails
            .default
            .as_ref()
            .map(|thumbnail| thumbnail.url.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// YouTube Data API v3 over reqwest. Holds one pooled client for all requests.
pub struct YouTubeDataClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeDataClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, YouTubeApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();

        Ok(YouTubeDataClient {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<T, YouTubeApiError> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!("GET {url} {query:?}");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(YouTubeApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl YouTubeApi for YouTubeDataClient {
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, YouTubeApiError> {
        let max_results = MAX_RESULTS_PER_CALL.to_string();
        let mut query = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response: ListResponse<PlaylistItemResource> =
            self.get("playlistItems", &query).await?;

        Ok(PlaylistItemsPage {
            video_ids: response
                .items
                .into_iter()
                .map(|item| item.content_details.video_id)
                .collect(),
            next_page_token: response.next_page_token.filter(|token| !token.is_empty()),
        })
    }

    async fn get_videos_details(
        &self,
        video_ids: &[String],
    ) -> Result<Vec<VideoDetails>, YouTubeApiError> {
        let ids = video_ids.join(",");
        let response: ListResponse<VideoResource> = self
            .get("videos", &[("part", "snippet,contentDetails"), ("id", ids.as_str())])
            .await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| VideoDetails {
                thumbnail_url: item.snippet.thumbnail_url(),
                id: item.id,
                title: item.snippet.title,
                description: item.snippet.description,
                duration: item.content_details.duration,
            })
            .collect())
    }

    async fn get_playlist_metadata(
        &self,
        playlist_id: &str,
    ) -> Result<Option<PlaylistMetadata>, YouTubeApiError> {
        let response: ListResponse<PlaylistResource> = self
            .get("playlists", &[("part", "snippet"), ("id", playlist_id)])
            .await?;

        Ok(response.items.into_iter().next().map(|item| PlaylistMetadata {
            thumbnail_url: item.snippet.thumbnail_url(),
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
        }))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> YouTubeDataClient {
        YouTubeDataClient::new("test-key", server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_playlist_items_first_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(query_param("playlistId", "PL1"))
            .and(query_param("maxResults", "50"))
            .and(query_param("part", "contentDetails"))
            .and(query_param("key", "test-key"))
            .and(query_param_is_missing("pageToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "nextPageToken": "CDIQAA",
                "items": [
                    { "contentDetails": { "videoId": "vid1" } },
                    { "contentDetails": { "videoId": "vid2" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .list_playlist_items("PL1", None)
            .await
            .unwrap();

        assert_eq!(page.video_ids, vec!["vid1", "vid2"]);
        assert_eq!(page.next_page_token.as_deref(), Some("CDIQAA"));
    }

    #[tokio::test]
    async fn test_list_playlist_items_follows_page_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(query_param("pageToken", "CDIQAA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [ { "contentDetails": { "videoId": "vid3" } } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .list_playlist_items("PL1", Some("CDIQAA"))
            .await
            .unwrap();

        assert_eq!(page.video_ids, vec!["vid3"]);
        assert_eq!(page.next_page_token, None);
    }

    #[tokio::test]
    async fn test_get_videos_details_parses_snippet_and_duration() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "vid1,vid2"))
            .and(query_param("part", "snippet,contentDetails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {
                        "id": "vid1",
                        "snippet": {
                            "title": "First",
                            "description": "one",
                            "thumbnails": { "default": { "url": "https://i.ytimg.com/vi/vid1/default.jpg" } }
                        },
                        "contentDetails": { "duration": "PT4M13S" }
                    },
                    {
                        "id": "vid2",
                        "snippet": { "title": "Second", "description": "", "thumbnails": {} },
                        "contentDetails": { "duration": "PT1H" }
                    }
                ]
            })))
            .mount(&server)
            .await;

        let ids = vec!["vid1".to_string(), "vid2".to_string()];
        let videos = client_for(&server).get_videos_details(&ids).await.unwrap();

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].title, "First");
        assert_eq!(videos[0].duration, "PT4M13S");
        assert_eq!(
            videos[0].thumbnail_url,
            "https://i.ytimg.com/vi/vid1/default.jpg"
        );
        assert_eq!(videos[1].thumbnail_url, "");
        assert_eq!(videos[1].duration, "PT1H");
    }

    #[tokio::test]
    async fn test_get_playlist_metadata_missing_playlist() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists"))
            .and(query_param("id", "PLgone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let metadata = client_for(&server)
            .get_playlist_metadata("PLgone")
            .await
            .unwrap();

        assert!(metadata.is_none());
    }

    #[tokio::test]
    async fn test_api_error_message_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "The request cannot be completed because you have exceeded your quota." }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_playlist_metadata("PL1")
            .await
            .unwrap_err();

        match err {
            YouTubeApiError::Api { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("exceeded your quota"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
