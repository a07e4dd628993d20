use crate::models::ErrorResponse;
use crate::services::youtube_client::YouTubeApiError;
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Response;
use thiserror::Error;

pub type AnalyzeResult<T> = Result<T, AnalyzeError>;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid YouTube URL")]
    InvalidUrl,

    #[error("Playlist {0} not found or private")]
    NotFound(String),

    #[error("Playlist {0} is empty or private")]
    EmptyPlaylist(String),

    #[error("YouTube API error: {0}")]
    Upstream(#[from] YouTubeApiError),
}

impl AnalyzeError {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::InvalidRequest(_) => "invalid_request",
            AnalyzeError::InvalidUrl => "invalid_url",
            AnalyzeError::NotFound(_) => "not_found",
            AnalyzeError::EmptyPlaylist(_) => "empty_playlist",
            AnalyzeError::Upstream(_) => "upstream_failure",
        }
    }

    pub fn status(&self) -> Status {
        match self {
            AnalyzeError::InvalidRequest(_) | AnalyzeError::InvalidUrl => Status::BadRequest,
            AnalyzeError::NotFound(_) => Status::NotFound,
            AnalyzeError::EmptyPlaylist(_) => Status::UnprocessableEntity,
            AnalyzeError::Upstream(_) => Status::BadGateway,
        }
    }
}

impl<'r> Responder<'r, 'static> for AnalyzeError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        };

        Response::build_from(Json(body).respond_to(request)?)
            .status(status)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_distinguished() {
        assert_eq!(AnalyzeError::InvalidUrl.status(), Status::BadRequest);
        assert_eq!(
            AnalyzeError::NotFound("PL1".into()).status(),
            Status::NotFound
        );
        assert_eq!(
            AnalyzeError::EmptyPlaylist("PL1".into()).status(),
            Status::UnprocessableEntity
        );
        assert_ne!(
            AnalyzeError::NotFound("PL1".into()).kind(),
            AnalyzeError::EmptyPlaylist("PL1".into()).kind()
        );
    }

    #[test]
    fn test_upstream_error_carries_message() {
        let err = AnalyzeError::from(YouTubeApiError::Api {
            status: 403,
            message: "quotaExceeded".to_string(),
        });

        assert_eq!(err.status(), Status::BadGateway);
        assert!(err.to_string().contains("quotaExceeded"));
    }
}
