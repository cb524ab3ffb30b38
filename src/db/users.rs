use sqlx::{Pool, QueryBuilder, Sqlite};
use tracing::{info, instrument};

use super::filter::Filter;
use crate::error::AppError;
use crate::models::{DbUserCredentials, User, UserFilter};

const USER_COLUMNS: &str = "SELECT id, name, airline_code, airport_code FROM users";

#[instrument]
pub async fn list_users(pool: &Pool<Sqlite>, filter: &UserFilter) -> Result<Vec<User>, AppError> {
    info!("Listing users");
    let mut qb = QueryBuilder::new(USER_COLUMNS);

    Filter::new()
        .contains("id", filter.code.as_deref())
        .contains("name", filter.name.as_deref())
        .equals("airline_code", filter.airline.as_deref())
        .equals("airport_code", filter.airport.as_deref())
        .push_where(&mut qb);

    qb.push(" ORDER BY id");

    Ok(qb.build_query_as::<User>().fetch_all(pool).await?)
}

#[instrument]
pub async fn get_user(pool: &Pool<Sqlite>, id: &str) -> Result<User, AppError> {
    info!("Fetching user by ID");
    let user = sqlx::query_as::<_, User>(&format!("{} WHERE id = ?", USER_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    user.ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}

#[instrument(skip(pool))]
pub async fn find_user_credentials(
    pool: &Pool<Sqlite>,
    id: &str,
) -> Result<Option<DbUserCredentials>, AppError> {
    info!("Looking up user credentials");
    let row = sqlx::query_as::<_, DbUserCredentials>("SELECT id, password FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// `password_hash` is the already-hashed credential.
#[instrument(skip(pool, password_hash))]
pub async fn create_user(
    pool: &Pool<Sqlite>,
    user: &User,
    password_hash: &str,
) -> Result<String, AppError> {
    info!(user_id = %user.id, "Creating new user");
    sqlx::query(
        "INSERT INTO users (id, name, password, airline_code, airport_code) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(password_hash)
    .bind(&user.airline_code)
    .bind(&user.airport_code)
    .execute(pool)
    .await
    .map_err(|e| {
        AppError::from(e)
            .on_conflict(format!("User {} already exists", user.id))
            .on_reference("Airline or airport code does not exist")
    })?;

    Ok(user.id.clone())
}

#[instrument(skip(pool, password_hash))]
pub async fn update_user(
    pool: &Pool<Sqlite>,
    id: &str,
    user: &User,
    password_hash: Option<&str>,
) -> Result<(), AppError> {
    info!(user_id = %id, "Updating user");
    let result = sqlx::query(
        "UPDATE users
         SET name = ?, airline_code = ?, airport_code = ?, password = COALESCE(?, password)
         WHERE id = ?",
    )
    .bind(&user.name)
    .bind(&user.airline_code)
    .bind(&user.airport_code)
    .bind(password_hash)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| AppError::from(e).on_reference("Airline or airport code does not exist"))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }

    Ok(())
}

/// Role assignments and sessions of the user are removed with it.
#[instrument]
pub async fn delete_user(pool: &Pool<Sqlite>, id: &str) -> Result<(), AppError> {
    info!("Deleting user");
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }

    Ok(())
}
