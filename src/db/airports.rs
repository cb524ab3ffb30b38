use sqlx::{Pool, QueryBuilder, Sqlite};
use tracing::{info, instrument};

use super::filter::Filter;
use crate::error::AppError;
use crate::models::{Airport, AirportFilter};

#[instrument]
pub async fn list_airports(
    pool: &Pool<Sqlite>,
    filter: &AirportFilter,
) -> Result<Vec<Airport>, AppError> {
    info!("Listing airports");
    let mut qb = QueryBuilder::new("SELECT code, name, city, country, use_yn FROM airports");

    Filter::new()
        .contains("code", filter.code.as_deref())
        .contains("name", filter.name.as_deref())
        .contains("city", filter.city.as_deref())
        .contains("country", filter.country.as_deref())
        .equals("use_yn", filter.yn.as_deref())
        .push_where(&mut qb);

    qb.push(" ORDER BY name, code");

    let airports = qb.build_query_as::<Airport>().fetch_all(pool).await?;
    Ok(airports)
}

#[instrument]
pub async fn create_airport(pool: &Pool<Sqlite>, airport: &Airport) -> Result<String, AppError> {
    info!("Creating airport");
    sqlx::query(
        "INSERT INTO airports (code, name, city, country, use_yn) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&airport.code)
    .bind(&airport.name)
    .bind(&airport.city)
    .bind(&airport.country)
    .bind(&airport.use_yn)
    .execute(pool)
    .await
    .map_err(|e| {
        AppError::from(e).on_conflict(format!("Airport {} already exists", airport.code))
    })?;

    Ok(airport.code.clone())
}

#[instrument]
pub async fn update_airport(
    pool: &Pool<Sqlite>,
    code: &str,
    airport: &Airport,
) -> Result<(), AppError> {
    info!("Updating airport");
    let result = sqlx::query(
        "UPDATE airports SET name = ?, city = ?, country = ?, use_yn = ? WHERE code = ?",
    )
    .bind(&airport.name)
    .bind(&airport.city)
    .bind(&airport.country)
    .bind(&airport.use_yn)
    .bind(code)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Airport {} not found", code)));
    }

    Ok(())
}

#[instrument]
pub async fn delete_airport(pool: &Pool<Sqlite>, code: &str) -> Result<(), AppError> {
    info!("Deleting airport");
    let result = sqlx::query("DELETE FROM airports WHERE code = ?")
        .bind(code)
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::from(e).on_reference(format!(
                "Airport {} is still referenced by flights or users",
                code
            ))
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Airport {} not found", code)));
    }

    Ok(())
}
