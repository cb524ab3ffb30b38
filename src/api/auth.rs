use chrono::{Duration, Utc};
use rocket::State;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};
use tracing::{info, warn};
use validator::Validate;

use super::{MessageResponse, message};
use crate::auth::{SessionUser, UserSession, verify_credential};
use crate::config::FidsConfig;
use crate::db::{create_user_session, find_user_credentials, get_user, invalidate_session};
use crate::error::AppError;
use crate::models::User;
use crate::validation::{FieldNames, ValidateExt, required};

const INVALID_CREDENTIALS: &str = "Invalid user ID or password";

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(rename = "userID", alias = "UserID", default)]
    #[validate(custom(function = "required"))]
    pub user_id: String,
    #[serde(alias = "Password", default)]
    #[validate(custom(function = "required"))]
    pub password: String,
}

impl FieldNames for LoginRequest {
    const FIELD_NAMES: &'static [(&'static str, &'static str)] = &[
        ("user_id", "userID"),
    ];
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
    pub expires_at: chrono::DateTime<Utc>,
}

/// Unknown ids and wrong digests fail with the same error.
#[post("/login", data = "<login>")]
pub async fn api_login(
    login: Json<LoginRequest>,
    db: &State<Pool<Sqlite>>,
    config: &State<FidsConfig>,
) -> Result<Json<LoginResponse>, AppError> {
    let login = login.into_inner().validated()?;
    let user_id = login.user_id.trim();

    let credentials = find_user_credentials(db, user_id).await?;
    let stored = credentials.as_ref().map(|c| c.password.as_str());

    if !verify_credential(login.password.trim(), stored, config.password_hash_cost) {
        warn!(user_id = %user_id, "Rejected login");
        return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
    }

    let user = get_user(db, user_id).await?;

    let token = UserSession::generate_token();
    let expires_at = Utc::now() + Duration::hours(config.session_ttl_hours);
    create_user_session(db, &user.id, &token, expires_at.naive_utc()).await?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user,
        token,
        expires_at,
    }))
}

#[get("/me")]
pub async fn api_me(session: SessionUser) -> Json<User> {
    Json(session.user)
}

#[post("/logout")]
pub async fn api_logout(
    session: SessionUser,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    invalidate_session(db, &session.token).await?;
    Ok(message("Logged out"))
}
