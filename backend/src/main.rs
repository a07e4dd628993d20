#[macro_use]
extern crate rocket;

mod api;
mod config;
mod error;
mod models;
mod services;
mod utils;

use crate::api::StaticDir;
use crate::config::Settings;
use crate::services::youtube_client::YouTubeApi;
use anyhow::Result;
use log::{error, info, warn};
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use std::sync::Arc;

pub struct AppState {
    pub youtube: Arc<dyn YouTubeApi>,
}

pub fn build_rocket(state: AppState, settings: &Settings) -> Result<Rocket<Build>> {
    let figment = rocket::Config::figment()
        .merge(("address", settings.address))
        .merge(("port", settings.port));

    let mut rocket = rocket::custom(figment)
        .manage(state)
        .attach(config::create_cors(settings)?)
        .mount("/api", routes![api::analyze_playlist, api::health]);

    if settings.static_dir.is_dir() {
        info!("Serving frontend from: {}", settings.static_dir.display());
        rocket = rocket
            .mount("/", FileServer::from(&settings.static_dir))
            .manage(StaticDir(settings.static_dir.clone()))
            .register("/", catchers![api::spa_fallback]);
    } else {
        warn!(
            "Static directory {} not found, serving API only",
            settings.static_dir.display()
        );
    }

    Ok(rocket)
}

fn setup() -> Result<Rocket<Build>> {
    let settings = Settings::from_env()?;
    let state = config::create_app_state(&settings)?;

    info!("API endpoint: POST /api/playlist/analyze on port {}", settings.port);
    build_rocket(state, &settings)
}

#[launch]
fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    match setup() {
        Ok(rocket) => rocket,
        Err(e) => {
            error!("Failed to start: {e:#}");
            std::process::exit(1);
        }
    }
}
