use sqlx::{Pool, QueryBuilder, Sqlite};
use tracing::{info, instrument};

use super::filter::Filter;
use crate::error::AppError;
use crate::models::{DbFlightReport, FlightFilter, FlightReport, NewFlight};

const FLIGHT_REPORT_QUERY: &str = "SELECT f.id, f.flight_number, f.airport_code, f.airline_code,
        f.flight_type, f.scheduled_date, f.scheduled_time, f.estimated_date, f.estimated_time,
        f.origin_dest_airport, f.remark_code,
        home.name AS home_airport_name,
        other.name AS airport_name,
        al.name AS airline_name,
        al.logo_path AS logo_path,
        r.name AS remark_name
    FROM flights f
    LEFT JOIN airports home ON home.code = f.airport_code
    LEFT JOIN airports other ON other.code = f.origin_dest_airport
    LEFT JOIN airlines al ON al.code = f.airline_code
    LEFT JOIN remarks r ON r.code = f.remark_code";

/// Stored dates carry no separators, but searches may arrive as `YYYY-MM-DD`.
pub fn normalize_date(date: &str) -> String {
    date.trim().replace('-', "")
}

#[instrument]
pub async fn list_flights(
    pool: &Pool<Sqlite>,
    filter: &FlightFilter,
) -> Result<Vec<FlightReport>, AppError> {
    info!("Listing flights");
    let date = filter.date.as_deref().map(normalize_date);

    let mut qb = QueryBuilder::new(FLIGHT_REPORT_QUERY);

    Filter::new()
        .equals("f.airline_code", filter.airline.as_deref())
        .equals_any(
            &["f.airport_code", "f.origin_dest_airport"],
            filter.airport.as_deref(),
        )
        .contains("f.flight_number", filter.flight_number.as_deref())
        .equals("f.scheduled_date", date.as_deref())
        .equals("f.flight_type", filter.flight_type.as_deref())
        .push_where(&mut qb);

    qb.push(" ORDER BY f.id");

    let rows = qb.build_query_as::<DbFlightReport>().fetch_all(pool).await?;

    Ok(rows.into_iter().map(FlightReport::from).collect())
}

#[instrument]
pub async fn get_flight(pool: &Pool<Sqlite>, id: i64) -> Result<FlightReport, AppError> {
    info!("Fetching flight by ID");
    let row = sqlx::query_as::<_, DbFlightReport>(&format!("{} WHERE f.id = ?", FLIGHT_REPORT_QUERY))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(FlightReport::from(row)),
        _ => Err(AppError::NotFound(format!("Flight {} not found", id))),
    }
}

#[instrument]
pub async fn create_flight(pool: &Pool<Sqlite>, flight: &NewFlight) -> Result<i64, AppError> {
    info!("Creating flight");
    let res = sqlx::query(
        "INSERT INTO flights
         (flight_number, airport_code, airline_code, flight_type, scheduled_date, scheduled_time,
          estimated_date, estimated_time, origin_dest_airport, remark_code)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&flight.flight_number)
    .bind(&flight.airport_code)
    .bind(&flight.airline_code)
    .bind(flight.flight_type.as_str())
    .bind(&flight.scheduled_date)
    .bind(&flight.scheduled_time)
    .bind(&flight.estimated_date)
    .bind(&flight.estimated_time)
    .bind(&flight.origin_dest_airport)
    .bind(&flight.remark_code)
    .execute(pool)
    .await
    .map_err(|e| {
        AppError::from(e).on_reference("Airport, airline or remark code does not exist")
    })?;

    Ok(res.last_insert_rowid())
}

#[instrument]
pub async fn update_flight(
    pool: &Pool<Sqlite>,
    id: i64,
    flight: &NewFlight,
) -> Result<(), AppError> {
    info!("Updating flight");
    let result = sqlx::query(
        "UPDATE flights
         SET flight_number = ?, airport_code = ?, airline_code = ?, flight_type = ?,
             scheduled_date = ?, scheduled_time = ?, estimated_date = ?, estimated_time = ?,
             origin_dest_airport = ?, remark_code = ?
         WHERE id = ?",
    )
    .bind(&flight.flight_number)
    .bind(&flight.airport_code)
    .bind(&flight.airline_code)
    .bind(flight.flight_type.as_str())
    .bind(&flight.scheduled_date)
    .bind(&flight.scheduled_time)
    .bind(&flight.estimated_date)
    .bind(&flight.estimated_time)
    .bind(&flight.origin_dest_airport)
    .bind(&flight.remark_code)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| {
        AppError::from(e).on_reference("Airport, airline or remark code does not exist")
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Flight {} not found", id)));
    }

    Ok(())
}

#[instrument]
pub async fn delete_flight(pool: &Pool<Sqlite>, id: i64) -> Result<(), AppError> {
    info!("Deleting flight");
    let result = sqlx::query("DELETE FROM flights WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Flight {} not found", id)));
    }

    Ok(())
}
