use rocket::fs::NamedFile;
use rocket::{catch, Request};
use std::path::PathBuf;

/// Directory holding the built presentation layer.
pub struct StaticDir(pub PathBuf);

// Unknown paths fall back to the single-page app's index.
#[catch(404)]
pub async fn spa_fallback(request: &Request<'_>) -> Option<NamedFile> {
    let static_dir = request.rocket().state::<StaticDir>()?;
    NamedFile::open(static_dir.0.join("index.html")).await.ok()
}
