use std::path::{Path, PathBuf};

use rocket::figment::Figment;
use rocket::figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "Fids.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FidsConfig {
    pub database_url: String,
    pub images_dir: PathBuf,
    pub session_ttl_hours: i64,
    pub password_hash_cost: u32,
    pub board_max_rows: usize,
    pub board_refresh_secs: u64,
    pub run_migrations: bool,
    pub environment: String,
    pub otlp_endpoint: Option<String>,
    pub otlp_api_key: Option<String>,
}

impl Default for FidsConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://fids.db".to_string(),
            images_dir: PathBuf::from("images"),
            session_ttl_hours: 8,
            password_hash_cost: bcrypt::DEFAULT_COST,
            board_max_rows: 12,
            board_refresh_secs: 1,
            run_migrations: false,
            environment: "development".to_string(),
            otlp_endpoint: None,
            otlp_api_key: None,
        }
    }
}

impl FidsConfig {
    /// Defaults, then `Fids.toml`, then `FIDS_*` variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(FidsConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("FIDS_"))
    }

    pub fn load() -> Result<Self, rocket::figment::Error> {
        Self::figment().extract()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Outcome of reading one dotenv file.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvFile {
    Loaded(String),
    Missing(String),
}

/// Loads dotenv files into the process environment. Runs before tracing is
/// set up, so the caller logs the returned outcomes.
pub fn load_environment() -> Result<Vec<EnvFile>, dotenvy::Error> {
    let is_production =
        dotenvy::var("FIDS_PROFILE").unwrap_or("development".to_string()) == "production";

    let env_files = if is_production {
        vec!["config/common.env", "config/prod.env", ".secrets.env"]
    } else {
        vec!["config/common.env", "config/dev.env", ".secrets.env"]
    };

    env_files.into_iter().map(load_env_file).collect()
}

fn load_env_file(path: &str) -> Result<EnvFile, dotenvy::Error> {
    if !Path::new(path).exists() {
        return Ok(EnvFile::Missing(path.to_string()));
    }

    dotenvy::from_filename_override(path)?;
    Ok(EnvFile::Loaded(path.to_string()))
}

pub fn log_env_files(files: &[EnvFile]) {
    for file in files {
        match file {
            EnvFile::Loaded(path) => tracing::info!("Loaded environment from: {}", path),
            EnvFile::Missing(path) => {
                tracing::warn!("Environment file {} not found, skipping", path)
            }
        }
    }
}
