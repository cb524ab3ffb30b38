use rocket::State;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::{CreatedResponse, MessageResponse, created, message};
use crate::db::{create_role, delete_role, list_roles, update_role};
use crate::error::AppError;
use crate::models::{Role, RoleFilter};
use crate::validation::{FieldNames, ValidateExt, required};

#[derive(Debug, Deserialize, Validate)]
pub struct RoleRequest {
    #[serde(rename = "RoleID", default)]
    #[validate(custom(function = "required"))]
    pub id: String,
    #[serde(rename = "RoleName", default)]
    #[validate(custom(function = "required"))]
    pub name: String,
}

impl FieldNames for RoleRequest {
    const FIELD_NAMES: &'static [(&'static str, &'static str)] = &[
        ("id", "RoleID"),
        ("name", "RoleName"),
    ];
}

impl From<RoleRequest> for Role {
    fn from(req: RoleRequest) -> Self {
        Self {
            id: req.id.trim().to_string(),
            name: req.name.trim().to_string(),
        }
    }
}

#[get("/roles?<filter..>")]
pub async fn api_list_roles(
    filter: RoleFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(list_roles(db, &filter).await?))
}

#[get("/roles_filter?<filter..>")]
pub async fn api_filter_roles(
    filter: RoleFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Role>>, AppError> {
    api_list_roles(filter, db).await
}

#[post("/roles", data = "<role>")]
pub async fn api_create_role(
    role: Json<RoleRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<CreatedResponse<String>>>, AppError> {
    let role = Role::from(role.into_inner().validated()?);
    let id = create_role(db, &role).await?;
    Ok(created(id))
}

#[put("/roles/<id>", data = "<role>")]
pub async fn api_update_role(
    id: &str,
    role: Json<RoleRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut request = role.into_inner();
    request.id = id.to_string();
    let role = Role::from(request.validated()?);

    update_role(db, id, &role).await?;
    Ok(message(format!("Role {} updated", id)))
}

/// Assignments of the role are removed along with it.
#[delete("/roles/<id>")]
pub async fn api_delete_role(
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_role(db, id).await?;
    Ok(message(format!("Role {} deleted", id)))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        api_list_roles,
        api_filter_roles,
        api_create_role,
        api_update_role,
        api_delete_role,
    ]
}
