#[macro_use]
extern crate rocket;

pub mod api;
pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod validation;
#[cfg(test)]
mod test;

use rocket::figment::{Figment, Profile};
use rocket::figment::providers::{Env, Format, Toml};
use rocket::{Build, Rocket};
use sqlx::SqlitePool;
use tracing::{info, warn};

use config::FidsConfig;
use telemetry::TelemetryFairing;

pub const DEFAULT_PORT: u16 = 9999;

/// Rocket's own settings with the service port as the default.
/// `Rocket.toml` (including the table of the `ROCKET_PROFILE` profile) and
/// `ROCKET_*` variables still override it.
pub fn rocket_figment() -> Figment {
    Figment::from(rocket::Config::default())
        .merge(("port", DEFAULT_PORT))
        .merge(Toml::file(Env::var_or("ROCKET_CONFIG", "Rocket.toml")).nested())
        .merge(Env::prefixed("ROCKET_").ignore(&["PROFILE"]).global())
        .select(Profile::from_env_or(
            "ROCKET_PROFILE",
            rocket::Config::DEFAULT_PROFILE,
        ))
}

pub fn init_rocket(pool: SqlitePool, config: FidsConfig) -> Rocket<Build> {
    info!("Starting flight information display service");

    // Built up front so the first unknown-user login costs the same as later ones.
    if auth::dummy_hash(config.password_hash_cost).is_none() {
        warn!(cost = config.password_hash_cost, "Could not build the unknown-user hash");
    }

    rocket::custom(rocket_figment())
        .manage(pool)
        .manage(config)
        .mount("/api", api::routes())
        .mount("/images", routes![api::images::image])
        .register("/api", api::catchers::catchers())
        .attach(TelemetryFairing)
}
