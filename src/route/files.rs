use std::path::PathBuf;

use rocket::fs::NamedFile;
use rocket::State;

use crate::config::Config;

pub async fn app_index_file(c: &State<Config>) -> Option<NamedFile> {
    let index = c.public_content.join("index.html");
    match NamedFile::open(&index).await {
        Ok(file) => Some(file),
        Err(e) => {
            tracing::warn!("Unable to open '{}': {}", index.display(), e);
            None
        }
    }
}

#[get("/")]
pub async fn app(c: &State<Config>) -> Option<NamedFile> {
    app_index_file(c).await
}

/// Static front-end assets. Unknown paths fall back to the index page.
#[get("/<path..>", rank = 10)]
pub async fn app_path(path: PathBuf, c: &State<Config>) -> Option<NamedFile> {
    match NamedFile::open(c.public_content.join(path)).await {
        Ok(file) => Some(file),
        Err(_) => app_index_file(c).await,
    }
}
