use std::time::Duration;

use fids::config::{FidsConfig, load_environment, log_env_files};
use fids::db::{clean_expired_sessions, connect, pending_migrations, run_migrations};
use fids::error::AppError;
use fids::init_rocket;
use fids::telemetry::{init_tracing, shutdown_telemetry};
use rocket::tokio;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{error, info};

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Anyhow(anyhow::Error),
    #[error("{0}")]
    Figment(rocket::figment::Error),
    #[error("Failed to load environment file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("{0}")]
    Rocket(Box<rocket::Error>),
    #[error("Application error: {0}")]
    App(#[from] AppError),
    #[error("Database has pending migrations {0:?}; run fids-migrate or set FIDS_RUN_MIGRATIONS=true")]
    PendingMigrations(Vec<i64>),
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Error::Anyhow(value)
    }
}

impl From<rocket::figment::Error> for Error {
    fn from(value: rocket::figment::Error) -> Self {
        Error::Figment(value)
    }
}

impl From<rocket::Error> for Error {
    fn from(value: rocket::Error) -> Self {
        Error::Rocket(Box::new(value))
    }
}

#[rocket::main]
async fn main() -> Result<(), Error> {
    let env_files = load_environment()?;
    let config = FidsConfig::load()?;

    init_tracing(&config)?;
    log_env_files(&env_files);

    let result = serve(config).await;
    if let Err(e) = &result {
        error!("{}", e);
    }

    shutdown_telemetry();
    result
}

async fn serve(config: FidsConfig) -> Result<(), Error> {
    let pool = connect(&config.database_url).await?;

    if config.run_migrations {
        run_migrations(&pool).await?;
    } else {
        let pending = pending_migrations(&pool).await?;
        if !pending.is_empty() {
            return Err(Error::PendingMigrations(pending));
        }
    }

    spawn_session_cleanup(pool.clone());

    init_rocket(pool, config).launch().await?;
    Ok(())
}

fn spawn_session_cleanup(pool: SqlitePool) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;

        loop {
            match clean_expired_sessions(&pool).await {
                Ok(count) => {
                    if count > 0 {
                        info!("Cleaned up {} expired sessions", count);
                    }
                }
                Err(e) => {
                    error!("Failed to clean expired sessions: {}", e);
                }
            }

            tokio::time::sleep(SESSION_CLEANUP_INTERVAL).await;
        }
    });
}
