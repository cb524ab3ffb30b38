use sqlx::{Pool, QueryBuilder, Sqlite};
use tracing::{info, instrument};

use super::filter::Filter;
use crate::error::AppError;
use crate::models::{UserRole, UserRoleFilter};

#[instrument]
pub async fn list_user_roles(
    pool: &Pool<Sqlite>,
    filter: &UserRoleFilter,
) -> Result<Vec<UserRole>, AppError> {
    info!("Listing user roles");
    let mut qb = QueryBuilder::new("SELECT id, user_id, role_id FROM user_roles");

    Filter::new()
        .equals("user_id", filter.user.as_deref())
        .equals("role_id", filter.role.as_deref())
        .push_where(&mut qb);

    qb.push(" ORDER BY id");

    Ok(qb.build_query_as::<UserRole>().fetch_all(pool).await?)
}

/// Assigns a role and returns the generated `URnnnn` id. The next sequence
/// number is computed inside the INSERT so concurrent writers cannot reuse it.
#[instrument]
pub async fn create_user_role(
    pool: &Pool<Sqlite>,
    user_id: &str,
    role_id: &str,
) -> Result<String, AppError> {
    info!("Assigning role to user");
    let id = sqlx::query_scalar::<_, String>(
        "INSERT INTO user_roles (id, user_id, role_id)
         SELECT printf('UR%04d', COALESCE(MAX(CAST(SUBSTR(id, 3) AS INTEGER)), 0) + 1), ?, ?
         FROM user_roles
         RETURNING id",
    )
    .bind(user_id)
    .bind(role_id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        AppError::from(e)
            .on_conflict(format!("User {} already has role {}", user_id, role_id))
            .on_reference(format!("User {} or role {} does not exist", user_id, role_id))
    })?;

    Ok(id)
}

#[instrument]
pub async fn update_user_role(
    pool: &Pool<Sqlite>,
    id: &str,
    user_id: &str,
    role_id: &str,
) -> Result<(), AppError> {
    info!("Updating user role");
    let result = sqlx::query("UPDATE user_roles SET user_id = ?, role_id = ? WHERE id = ?")
        .bind(user_id)
        .bind(role_id)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::from(e)
                .on_conflict(format!("User {} already has role {}", user_id, role_id))
                .on_reference(format!("User {} or role {} does not exist", user_id, role_id))
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User role {} not found", id)));
    }

    Ok(())
}

#[instrument]
pub async fn delete_user_role(pool: &Pool<Sqlite>, id: &str) -> Result<(), AppError> {
    info!("Deleting user role");
    let result = sqlx::query("DELETE FROM user_roles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User role {} not found", id)));
    }

    Ok(())
}
