use rocket::State;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::{CreatedResponse, MessageResponse, created, message, optional, use_flag_or_default};
use crate::db::{create_airline, delete_airline, list_airlines, update_airline};
use crate::error::AppError;
use crate::models::{Airline, AirlineFilter};
use crate::validation::{FieldNames, ValidateExt, required, use_flag};

#[derive(Debug, Deserialize, Validate)]
pub struct AirlineRequest {
    #[serde(rename = "AirlineCode", default)]
    #[validate(custom(function = "required"))]
    pub code: String,
    #[serde(rename = "AirlineName", default)]
    #[validate(custom(function = "required"))]
    pub name: String,
    /// Path under `/images/` of the logo shown on the boards.
    #[serde(rename = "LogoPath", default)]
    pub logo_path: Option<String>,
    #[serde(rename = "UseYn", default)]
    #[validate(custom(function = "use_flag"))]
    pub use_yn: String,
}

impl FieldNames for AirlineRequest {
    const FIELD_NAMES: &'static [(&'static str, &'static str)] = &[
        ("code", "AirlineCode"),
        ("name", "AirlineName"),
        ("use_yn", "UseYn"),
    ];
}

impl From<AirlineRequest> for Airline {
    fn from(req: AirlineRequest) -> Self {
        Self {
            code: req.code.trim().to_string(),
            name: req.name.trim().to_string(),
            logo_path: optional(req.logo_path),
            use_yn: use_flag_or_default(&req.use_yn),
        }
    }
}

#[get("/airlines?<filter..>")]
pub async fn api_list_airlines(
    filter: AirlineFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Airline>>, AppError> {
    Ok(Json(list_airlines(db, &filter).await?))
}

#[get("/airlines_filter?<filter..>")]
pub async fn api_filter_airlines(
    filter: AirlineFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Airline>>, AppError> {
    api_list_airlines(filter, db).await
}

#[post("/airlines", data = "<airline>")]
pub async fn api_create_airline(
    airline: Json<AirlineRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<CreatedResponse<String>>>, AppError> {
    let airline = Airline::from(airline.into_inner().validated()?);
    let code = create_airline(db, &airline).await?;
    Ok(created(code))
}

#[put("/airlines/<code>", data = "<airline>")]
pub async fn api_update_airline(
    code: &str,
    airline: Json<AirlineRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut request = airline.into_inner();
    request.code = code.to_string();
    let airline = Airline::from(request.validated()?);

    update_airline(db, code, &airline).await?;
    Ok(message(format!("Airline {} updated", code)))
}

#[delete("/airlines/<code>")]
pub async fn api_delete_airline(
    code: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_airline(db, code).await?;
    Ok(message(format!("Airline {} deleted", code)))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        api_list_airlines,
        api_filter_airlines,
        api_create_airline,
        api_update_airline,
        api_delete_airline,
    ]
}
