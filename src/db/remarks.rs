use sqlx::{Pool, QueryBuilder, Sqlite};
use tracing::{info, instrument};

use super::filter::Filter;
use crate::error::AppError;
use crate::models::{Remark, RemarkFilter};

#[instrument]
pub async fn list_remarks(
    pool: &Pool<Sqlite>,
    filter: &RemarkFilter,
) -> Result<Vec<Remark>, AppError> {
    info!("Listing remarks");
    let mut qb = QueryBuilder::new("SELECT code, name, use_yn FROM remarks");

    Filter::new()
        .contains("code", filter.code.as_deref())
        .contains("name", filter.name.as_deref())
        .equals("use_yn", filter.yn.as_deref())
        .push_where(&mut qb);

    qb.push(" ORDER BY name, code");

    Ok(qb.build_query_as::<Remark>().fetch_all(pool).await?)
}

#[instrument]
pub async fn create_remark(pool: &Pool<Sqlite>, remark: &Remark) -> Result<String, AppError> {
    info!("Creating remark");
    sqlx::query("INSERT INTO remarks (code, name, use_yn) VALUES (?, ?, ?)")
        .bind(&remark.code)
        .bind(&remark.name)
        .bind(&remark.use_yn)
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::from(e).on_conflict(format!("Remark {} already exists", remark.code))
        })?;

    Ok(remark.code.clone())
}

#[instrument]
pub async fn update_remark(
    pool: &Pool<Sqlite>,
    code: &str,
    remark: &Remark,
) -> Result<(), AppError> {
    info!("Updating remark");
    let result = sqlx::query("UPDATE remarks SET name = ?, use_yn = ? WHERE code = ?")
        .bind(&remark.name)
        .bind(&remark.use_yn)
        .bind(code)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Remark {} not found", code)));
    }

    Ok(())
}

#[instrument]
pub async fn delete_remark(pool: &Pool<Sqlite>, code: &str) -> Result<(), AppError> {
    info!("Deleting remark");
    let result = sqlx::query("DELETE FROM remarks WHERE code = ?")
        .bind(code)
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::from(e)
                .on_reference(format!("Remark {} is still used by flights", code))
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Remark {} not found", code)));
    }

    Ok(())
}
