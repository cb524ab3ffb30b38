use sqlx::{Pool, QueryBuilder, Sqlite};
use tracing::{info, instrument};

use super::filter::Filter;
use crate::error::AppError;
use crate::models::{Airline, AirlineFilter};

#[instrument]
pub async fn list_airlines(
    pool: &Pool<Sqlite>,
    filter: &AirlineFilter,
) -> Result<Vec<Airline>, AppError> {
    info!("Listing airlines");
    let mut qb = QueryBuilder::new("SELECT code, name, logo_path, use_yn FROM airlines");

    Filter::new()
        .contains("code", filter.code.as_deref())
        .contains("name", filter.name.as_deref())
        .contains("logo_path", filter.logopath.as_deref())
        .equals("use_yn", filter.yn.as_deref())
        .push_where(&mut qb);

    qb.push(" ORDER BY name, code");

    Ok(qb.build_query_as::<Airline>().fetch_all(pool).await?)
}

#[instrument]
pub async fn create_airline(pool: &Pool<Sqlite>, airline: &Airline) -> Result<String, AppError> {
    info!("Creating airline");
    sqlx::query("INSERT INTO airlines (code, name, logo_path, use_yn) VALUES (?, ?, ?, ?)")
        .bind(&airline.code)
        .bind(&airline.name)
        .bind(&airline.logo_path)
        .bind(&airline.use_yn)
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::from(e).on_conflict(format!("Airline {} already exists", airline.code))
        })?;

    Ok(airline.code.clone())
}

#[instrument]
pub async fn update_airline(
    pool: &Pool<Sqlite>,
    code: &str,
    airline: &Airline,
) -> Result<(), AppError> {
    info!("Updating airline");
    let result =
        sqlx::query("UPDATE airlines SET name = ?, logo_path = ?, use_yn = ? WHERE code = ?")
            .bind(&airline.name)
            .bind(&airline.logo_path)
            .bind(&airline.use_yn)
            .bind(code)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Airline {} not found", code)));
    }

    Ok(())
}

#[instrument]
pub async fn delete_airline(pool: &Pool<Sqlite>, code: &str) -> Result<(), AppError> {
    info!("Deleting airline");
    let result = sqlx::query("DELETE FROM airlines WHERE code = ?")
        .bind(code)
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::from(e).on_reference(format!(
                "Airline {} is still referenced by flights or users",
                code
            ))
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Airline {} not found", code)));
    }

    Ok(())
}
