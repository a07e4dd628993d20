use crate::services::youtube_client::{YouTubeApi, YouTubeDataClient};
use crate::AppState;
use anyhow::{Context, Result};
use env_logger::Builder;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "frontend/dist";

#[derive(Debug, Clone)]
pub struct Settings {
    pub youtube_api_key: String,
    pub youtube_api_base_url: String,
    pub request_timeout: Duration,
    pub address: IpAddr,
    pub port: u16,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
    pub static_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let youtube_api_key = get("YOUTUBE_API_KEY")
            .context("YOUTUBE_API_KEY environment variable must be set")?;

        Ok(Settings {
            youtube_api_key,
            youtube_api_base_url: get("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_YOUTUBE_API_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(parse_or(
                get("YOUTUBE_REQUEST_TIMEOUT_SECS"),
                "YOUTUBE_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            address: parse_or(
                get("ADDRESS"),
                "ADDRESS",
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            )?,
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            static_dir: PathBuf::from(
                get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            ),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_lookup(|key| (key == "YOUTUBE_API_KEY").then(|| "test-key".to_string()))
            .map(|settings| Settings {
                static_dir: PathBuf::from("does/not/exist"),
                ..settings
            })
            .expect("test settings")
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
    info!("Starting playlist-length backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_youtube_client(settings: &Settings) -> Result<Arc<dyn YouTubeApi>> {
    info!(
        "Using YouTube Data API at: {} (timeout {:?})",
        settings.youtube_api_base_url, settings.request_timeout
    );

    let client = YouTubeDataClient::new(
        settings.youtube_api_key.clone(),
        settings.youtube_api_base_url.clone(),
        settings.request_timeout,
    )
    .context("Failed to create YouTube API client")?;

    Ok(Arc::new(client))
}

pub fn create_app_state(settings: &Settings) -> Result<AppState> {
    Ok(AppState {
        youtube: create_youtube_client(settings)?,
    })
}

pub fn create_cors(settings: &Settings) -> Result<rocket_cors::Cors> {
    let allowed_origins = if settings.cors_allowed_origins.is_empty() {
        AllowedOrigins::all()
    } else {
        AllowedOrigins::some_exact(&settings.cors_allowed_origins)
    };

    let cors = CorsOptions::default()
        .allowed_origins(allowed_origins)
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
