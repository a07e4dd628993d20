pub mod playlist_service;
pub mod youtube_client;
