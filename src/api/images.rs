use std::path::PathBuf;

use rocket::State;
use rocket::fs::NamedFile;

use crate::config::FidsConfig;

/// Airline logos and other board artwork. `PathBuf` segments are checked by
/// Rocket, so `..` cannot leave the images directory.
#[get("/<path..>")]
pub async fn image(path: PathBuf, config: &State<FidsConfig>) -> Option<NamedFile> {
    NamedFile::open(config.images_dir.join(path)).await.ok()
}
