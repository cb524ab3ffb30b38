use rocket::State;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::{CreatedResponse, MessageResponse, created, message};
use crate::db::{create_user_role, delete_user_role, list_user_roles, update_user_role};
use crate::error::AppError;
use crate::models::{UserRole, UserRoleFilter};
use crate::validation::{FieldNames, ValidateExt, required};

/// `UserRoleID` is generated on create and ignored if sent.
#[derive(Debug, Deserialize, Validate)]
pub struct UserRoleRequest {
    #[serde(rename = "UserID", default)]
    #[validate(custom(function = "required"))]
    pub user_id: String,
    #[serde(rename = "RoleID", default)]
    #[validate(custom(function = "required"))]
    pub role_id: String,
}

impl FieldNames for UserRoleRequest {
    const FIELD_NAMES: &'static [(&'static str, &'static str)] = &[
        ("user_id", "UserID"),
        ("role_id", "RoleID"),
    ];
}

#[get("/userroles?<filter..>")]
pub async fn api_list_user_roles(
    filter: UserRoleFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<UserRole>>, AppError> {
    Ok(Json(list_user_roles(db, &filter).await?))
}

#[get("/userroles_filter?<filter..>")]
pub async fn api_filter_user_roles(
    filter: UserRoleFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<UserRole>>, AppError> {
    api_list_user_roles(filter, db).await
}

#[post("/userroles", data = "<assignment>")]
pub async fn api_create_user_role(
    assignment: Json<UserRoleRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<CreatedResponse<String>>>, AppError> {
    let assignment = assignment.into_inner().validated()?;
    let id = create_user_role(
        db,
        assignment.user_id.trim(),
        assignment.role_id.trim(),
    )
    .await?;
    Ok(created(id))
}

#[put("/userroles/<id>", data = "<assignment>")]
pub async fn api_update_user_role(
    id: &str,
    assignment: Json<UserRoleRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    let assignment = assignment.into_inner().validated()?;
    update_user_role(
        db,
        id,
        assignment.user_id.trim(),
        assignment.role_id.trim(),
    )
    .await?;
    Ok(message(format!("User role {} updated", id)))
}

#[delete("/userroles/<id>")]
pub async fn api_delete_user_role(
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_user_role(db, id).await?;
    Ok(message(format!("User role {} deleted", id)))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        api_list_user_roles,
        api_filter_user_roles,
        api_create_user_role,
        api_update_user_role,
        api_delete_user_role,
    ]
}
