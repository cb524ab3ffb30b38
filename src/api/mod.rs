pub mod airlines;
pub mod airports;
pub mod auth;
pub mod boards;
pub mod catchers;
pub mod flights;
pub mod images;
pub mod remarks;
pub mod roles;
pub mod user_roles;
pub mod users;

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

use crate::validation::non_blank;

/// Body of a successful create.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse<T> {
    pub id: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn created<T>(id: T) -> Custom<Json<CreatedResponse<T>>> {
    Custom(Status::Created, Json(CreatedResponse { id }))
}

pub fn message(text: impl Into<String>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.into(),
    })
}

/// Trimmed value, or `None` for blank input.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    non_blank(value.as_deref()).map(str::to_string)
}

/// `UseYn` falls back to `Y` when left blank.
pub(crate) fn use_flag_or_default(value: &str) -> String {
    match value.trim() {
        "" => "Y".to_string(),
        v => v.to_string(),
    }
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}

pub fn routes() -> Vec<rocket::Route> {
    let mut routes = routes![
        health,
        auth::api_login,
        auth::api_me,
        auth::api_logout,
        boards::api_board,
        boards::api_board_stream,
    ];

    routes.extend(airports::routes());
    routes.extend(airlines::routes());
    routes.extend(remarks::routes());
    routes.extend(roles::routes());
    routes.extend(users::routes());
    routes.extend(user_roles::routes());
    routes.extend(flights::routes());
    routes
}
