use rocket::State;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::{CreatedResponse, MessageResponse, created, message, optional};
use crate::db::{create_flight, delete_flight, get_flight, list_flights, update_flight};
use crate::error::AppError;
use crate::models::{FlightFilter, FlightReport, FlightType, NewFlight};
use crate::validation::{
    FieldNames, ValidateExt, flight_type, optional_date, optional_time, required,
    schedule_date, schedule_time,
};

#[derive(Debug, Deserialize, Validate)]
pub struct FlightRequest {
    #[serde(rename = "FlightNumber", default)]
    #[validate(custom(function = "required"))]
    pub flight_number: String,
    /// The home airport of the schedule.
    #[serde(rename = "AirportCode", default)]
    #[validate(custom(function = "required"))]
    pub airport_code: String,
    #[serde(rename = "AirlineCode", default)]
    #[validate(custom(function = "required"))]
    pub airline_code: String,
    #[serde(rename = "FlightType", default)]
    #[validate(custom(function = "flight_type"))]
    pub flight_type: String,
    #[serde(rename = "ScheduledDate", default)]
    #[validate(custom(function = "schedule_date"))]
    pub scheduled_date: String,
    #[serde(rename = "ScheduledTime", default)]
    #[validate(custom(function = "schedule_time"))]
    pub scheduled_time: String,
    #[serde(rename = "EstimatedDate", default)]
    #[validate(custom(function = "optional_date"))]
    pub estimated_date: Option<String>,
    #[serde(rename = "EstimatedTime", default)]
    #[validate(custom(function = "optional_time"))]
    pub estimated_time: Option<String>,
    /// Origin of an arrival, destination of a departure.
    #[serde(rename = "OriginDestAirport", default)]
    #[validate(custom(function = "required"))]
    pub origin_dest_airport: String,
    #[serde(rename = "Remarks", default)]
    pub remarks: Option<String>,
}

impl FieldNames for FlightRequest {
    const FIELD_NAMES: &'static [(&'static str, &'static str)] = &[
        ("flight_number", "FlightNumber"),
        ("airport_code", "AirportCode"),
        ("airline_code", "AirlineCode"),
        ("flight_type", "FlightType"),
        ("scheduled_date", "ScheduledDate"),
        ("scheduled_time", "ScheduledTime"),
        ("estimated_date", "EstimatedDate"),
        ("estimated_time", "EstimatedTime"),
        ("origin_dest_airport", "OriginDestAirport"),
    ];
}

impl TryFrom<FlightRequest> for NewFlight {
    type Error = AppError;

    fn try_from(req: FlightRequest) -> Result<Self, Self::Error> {
        let flight_type = FlightType::parse(&req.flight_type).ok_or_else(|| {
            AppError::Validation(format!("Unknown flight type {}", req.flight_type))
        })?;

        Ok(Self {
            flight_number: req.flight_number.trim().to_string(),
            airport_code: req.airport_code.trim().to_string(),
            airline_code: req.airline_code.trim().to_string(),
            flight_type,
            scheduled_date: req.scheduled_date.trim().to_string(),
            scheduled_time: req.scheduled_time.trim().to_string(),
            estimated_date: optional(req.estimated_date),
            estimated_time: optional(req.estimated_time),
            origin_dest_airport: req.origin_dest_airport.trim().to_string(),
            remark_code: optional(req.remarks),
        })
    }
}

#[get("/flights?<filter..>")]
pub async fn api_list_flights(
    filter: FlightFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<FlightReport>>, AppError> {
    Ok(Json(list_flights(db, &filter).await?))
}

#[get("/flights_filter?<filter..>")]
pub async fn api_filter_flights(
    filter: FlightFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<FlightReport>>, AppError> {
    api_list_flights(filter, db).await
}

#[get("/flights/<id>")]
pub async fn api_get_flight(
    id: i64,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<FlightReport>, AppError> {
    Ok(Json(get_flight(db, id).await?))
}

#[post("/flights", data = "<flight>")]
pub async fn api_create_flight(
    flight: Json<FlightRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<CreatedResponse<i64>>>, AppError> {
    let flight = NewFlight::try_from(flight.into_inner().validated()?)?;
    let id = create_flight(db, &flight).await?;
    Ok(created(id))
}

#[put("/flights/<id>", data = "<flight>")]
pub async fn api_update_flight(
    id: i64,
    flight: Json<FlightRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    let flight = NewFlight::try_from(flight.into_inner().validated()?)?;
    update_flight(db, id, &flight).await?;
    Ok(message(format!("Flight {} updated", id)))
}

#[delete("/flights/<id>")]
pub async fn api_delete_flight(
    id: i64,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_flight(db, id).await?;
    Ok(message(format!("Flight {} deleted", id)))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        api_list_flights,
        api_filter_flights,
        api_get_flight,
        api_create_flight,
        api_update_flight,
        api_delete_flight,
    ]
}
