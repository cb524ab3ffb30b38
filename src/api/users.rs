use rocket::State;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::{CreatedResponse, MessageResponse, created, message, optional};
use crate::auth::hash_credential;
use crate::config::FidsConfig;
use crate::db::{create_user, delete_user, list_users, update_user};
use crate::error::AppError;
use crate::models::{User, UserFilter};
use crate::validation::{FieldNames, ValidateExt, non_blank, required};

/// Signup body. The camelCase spellings are accepted from older clients.
#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    #[serde(rename = "UserID", alias = "userID", default)]
    #[validate(custom(function = "required"))]
    pub id: String,
    #[serde(rename = "UserName", alias = "userName", default)]
    #[validate(custom(function = "required"))]
    pub name: String,
    /// Digest computed by the client.
    #[serde(rename = "Password", alias = "password", default)]
    #[validate(custom(function = "required"))]
    pub password: String,
    #[serde(rename = "AirlineCode", alias = "airlineCode", default)]
    pub airline_code: Option<String>,
    #[serde(rename = "AirportCode", alias = "airportCode", default)]
    pub airport_code: Option<String>,
}

impl FieldNames for UserRequest {
    const FIELD_NAMES: &'static [(&'static str, &'static str)] = &[
        ("id", "UserID"),
        ("name", "UserName"),
        ("password", "Password"),
    ];
}

/// Full-row replace. A blank `Password` keeps the stored credential.
#[derive(Debug, Deserialize, Validate)]
pub struct UserUpdateRequest {
    #[serde(rename = "UserName", alias = "userName", default)]
    #[validate(custom(function = "required"))]
    pub name: String,
    #[serde(rename = "Password", alias = "password", default)]
    pub password: Option<String>,
    #[serde(rename = "AirlineCode", alias = "airlineCode", default)]
    pub airline_code: Option<String>,
    #[serde(rename = "AirportCode", alias = "airportCode", default)]
    pub airport_code: Option<String>,
}

impl FieldNames for UserUpdateRequest {
    const FIELD_NAMES: &'static [(&'static str, &'static str)] = &[
        ("name", "UserName"),
    ];
}

#[get("/users?<filter..>")]
pub async fn api_list_users(
    filter: UserFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(list_users(db, &filter).await?))
}

#[get("/users_filter?<filter..>")]
pub async fn api_filter_users(
    filter: UserFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<User>>, AppError> {
    api_list_users(filter, db).await
}

#[post("/users", data = "<signup>")]
pub async fn api_create_user(
    signup: Json<UserRequest>,
    db: &State<Pool<Sqlite>>,
    config: &State<FidsConfig>,
) -> Result<Custom<Json<CreatedResponse<String>>>, AppError> {
    let signup = signup.into_inner().validated()?;

    let password_hash = hash_credential(signup.password.trim(), config.password_hash_cost)?;
    let user = User {
        id: signup.id.trim().to_string(),
        name: signup.name.trim().to_string(),
        airline_code: optional(signup.airline_code),
        airport_code: optional(signup.airport_code),
    };

    let id = create_user(db, &user, &password_hash).await?;
    Ok(created(id))
}

#[put("/users/<id>", data = "<update>")]
pub async fn api_update_user(
    id: &str,
    update: Json<UserUpdateRequest>,
    db: &State<Pool<Sqlite>>,
    config: &State<FidsConfig>,
) -> Result<Json<MessageResponse>, AppError> {
    let update = update.into_inner().validated()?;

    let password_hash = match non_blank(update.password.as_deref()) {
        Some(digest) => Some(hash_credential(digest, config.password_hash_cost)?),
        None => None,
    };

    let user = User {
        id: id.to_string(),
        name: update.name.trim().to_string(),
        airline_code: optional(update.airline_code),
        airport_code: optional(update.airport_code),
    };

    update_user(db, id, &user, password_hash.as_deref()).await?;
    Ok(message(format!("User {} updated", id)))
}

#[delete("/users/<id>")]
pub async fn api_delete_user(
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_user(db, id).await?;
    Ok(message(format!("User {} deleted", id)))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        api_list_users,
        api_filter_users,
        api_create_user,
        api_update_user,
        api_delete_user,
    ]
}
