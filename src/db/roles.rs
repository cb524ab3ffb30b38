use sqlx::{Pool, QueryBuilder, Sqlite};
use tracing::{info, instrument};

use super::filter::Filter;
use crate::error::AppError;
use crate::models::{Role, RoleFilter};

#[instrument]
pub async fn list_roles(pool: &Pool<Sqlite>, filter: &RoleFilter) -> Result<Vec<Role>, AppError> {
    info!("Listing roles");
    let mut qb = QueryBuilder::new("SELECT id, name FROM roles");

    Filter::new()
        .contains("id", filter.code.as_deref())
        .contains("name", filter.name.as_deref())
        .push_where(&mut qb);

    qb.push(" ORDER BY id");

    Ok(qb.build_query_as::<Role>().fetch_all(pool).await?)
}

#[instrument]
pub async fn create_role(pool: &Pool<Sqlite>, role: &Role) -> Result<String, AppError> {
    info!("Creating role");
    sqlx::query("INSERT INTO roles (id, name) VALUES (?, ?)")
        .bind(&role.id)
        .bind(&role.name)
        .execute(pool)
        .await
        .map_err(|e| AppError::from(e).on_conflict(format!("Role {} already exists", role.id)))?;

    Ok(role.id.clone())
}

#[instrument]
pub async fn update_role(pool: &Pool<Sqlite>, id: &str, role: &Role) -> Result<(), AppError> {
    info!("Updating role");
    let result = sqlx::query("UPDATE roles SET name = ? WHERE id = ?")
        .bind(&role.name)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Role {} not found", id)));
    }

    Ok(())
}

/// Assignments of the role are removed with it.
#[instrument]
pub async fn delete_role(pool: &Pool<Sqlite>, id: &str) -> Result<(), AppError> {
    info!("Deleting role");
    let result = sqlx::query("DELETE FROM roles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Role {} not found", id)));
    }

    Ok(())
}
