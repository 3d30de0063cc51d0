//! User accounts and credential lookups

use crate::{timestamp_to_datetime, Result, StorageError};
use shelf_core::types::{NewUser, Role, User, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role: role
            .parse::<Role>()
            .map_err(|e| StorageError::InvalidData(e.to_string()))?,
        created_at: timestamp_to_datetime(row.try_get("created_at")?)?,
    })
}

/// Create a new account
///
/// Fails with [`StorageError::Duplicate`] when the email is already registered.
pub async fn create(pool: &SqlitePool, user: NewUser) -> Result<User> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO users (name, email, password_hash, role, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role.as_str())
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_write(e, "user", || user.email.clone()))?;

    let id = result.last_insert_rowid();
    tracing::info!(user_id = id, "Created user account");

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("User", id))
}

pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, name, email, password_hash, role, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Look up an account by login email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, name, email, password_hash, role, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Check whether an email is already registered
pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}
