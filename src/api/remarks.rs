use rocket::State;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use validator::Validate;

use super::{CreatedResponse, MessageResponse, created, message, use_flag_or_default};
use crate::db::{create_remark, delete_remark, list_remarks, update_remark};
use crate::error::AppError;
use crate::models::{Remark, RemarkFilter};
use crate::validation::{FieldNames, ValidateExt, required, use_flag};

#[derive(Debug, Deserialize, Validate)]
pub struct RemarkRequest {
    #[serde(rename = "RemarkCode", default)]
    #[validate(custom(function = "required"))]
    pub code: String,
    #[serde(rename = "RemarkName", default)]
    #[validate(custom(function = "required"))]
    pub name: String,
    #[serde(rename = "UseYn", default)]
    #[validate(custom(function = "use_flag"))]
    pub use_yn: String,
}

impl FieldNames for RemarkRequest {
    const FIELD_NAMES: &'static [(&'static str, &'static str)] = &[
        ("code", "RemarkCode"),
        ("name", "RemarkName"),
        ("use_yn", "UseYn"),
    ];
}

impl From<RemarkRequest> for Remark {
    fn from(req: RemarkRequest) -> Self {
        Self {
            code: req.code.trim().to_string(),
            name: req.name.trim().to_string(),
            use_yn: use_flag_or_default(&req.use_yn),
        }
    }
}

#[get("/remarks?<filter..>")]
pub async fn api_list_remarks(
    filter: RemarkFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Remark>>, AppError> {
    Ok(Json(list_remarks(db, &filter).await?))
}

#[get("/remarks_filter?<filter..>")]
pub async fn api_filter_remarks(
    filter: RemarkFilter,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Vec<Remark>>, AppError> {
    api_list_remarks(filter, db).await
}

#[post("/remarks", data = "<remark>")]
pub async fn api_create_remark(
    remark: Json<RemarkRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<CreatedResponse<String>>>, AppError> {
    let remark = Remark::from(remark.into_inner().validated()?);
    let code = create_remark(db, &remark).await?;
    Ok(created(code))
}

#[put("/remarks/<code>", data = "<remark>")]
pub async fn api_update_remark(
    code: &str,
    remark: Json<RemarkRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut request = remark.into_inner();
    request.code = code.to_string();
    let remark = Remark::from(request.validated()?);

    update_remark(db, code, &remark).await?;
    Ok(message(format!("Remark {} updated", code)))
}

#[delete("/remarks/<code>")]
pub async fn api_delete_remark(
    code: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_remark(db, code).await?;
    Ok(message(format!("Remark {} deleted", code)))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        api_list_remarks,
        api_filter_remarks,
        api_create_remark,
        api_update_remark,
        api_delete_remark,
    ]
}
