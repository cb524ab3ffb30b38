use rocket::State;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::{CreatedResponse, MessageResponse, created, message, optional, use_flag_or_default};
use crate::db::{create_airport, delete_airport, list_airports, update_airport};
use crate::error::AppError;
use crate::models::{Airport, AirportFilter};
use crate::validation::{FieldNames, ValidateExt, required, use_flag};

#[derive(Debug, Deserialize, Validate)]
pub struct AirportRequest {
    #[serde(rename = "AirportCode", default)]
    #[validate(custom(function = "required"))]
    pub code: String,
    #[serde(rename = "AirportName", default)]
    #[validate(custom(function = "required"))]
    pub name: String,
    #[serde(rename = "City", default)]
    pub city: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "UseYn", default)]
    #[validate(custom(function = "use_flag"))]
    pub use_yn: String,
}

impl FieldNames for AirportRequest {
    const FIELD_NAMES: &'static [(&'static str, &'static str)] = &[
        ("code", "AirportCode"),
        ("name", "AirportName"),
        ("use_yn", "UseYn"),
    ];
}

impl From<AirportRequest> for Airport {
    fn from(req: AirportRequest) -> Self {
        Self {
            code: req.code.trim().to_string(),
            name: req.name.trim().to_string(),
            city: optional(req.city),
            country: optional(req.country),
            use_yn: use_flag_or_default(&req.use_yn),
        }
    }
}

#[get("/airports?<filter..>")]
pub async fn api_list_airports(
    filter: AirportFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Airport>>, AppError> {
    Ok(Json(list_airports(db, &filter).await?))
}

#[get("/airports_filter?<filter..>")]
pub async fn api_filter_airports(
    filter: AirportFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Airport>>, AppError> {
    api_list_airports(filter, db).await
}

#[post("/airports", data = "<airport>")]
pub async fn api_create_airport(
    airport: Json<AirportRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<CreatedResponse<String>>>, AppError> {
    let airport = Airport::from(airport.into_inner().validated()?);
    let code = create_airport(db, &airport).await?;
    Ok(created(code))
}

#[put("/airports/<code>", data = "<airport>")]
pub async fn api_update_airport(
    code: &str,
    airport: Json<AirportRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut request = airport.into_inner();
    request.code = code.to_string();
    let airport = Airport::from(request.validated()?);

    update_airport(db, code, &airport).await?;
    Ok(message(format!("Airport {} updated", code)))
}

#[delete("/airports/<code>")]
pub async fn api_delete_airport(
    code: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_airport(db, code).await?;
    Ok(message(format!("Airport {} deleted", code)))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        api_list_airports,
        api_filter_airports,
        api_create_airport,
        api_update_airport,
        api_delete_airport,
    ]
}
