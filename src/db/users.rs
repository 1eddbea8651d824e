use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{User, UserPatch};

pub async fn create(pool: &PgPool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, login_name, password_hash, salt, login_ip, login_at, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(user.id)
    .bind(&user.login_name)
    .bind(&user.password_hash)
    .bind(&user.salt)
    .bind(&user.login_ip)
    .bind(user.login_at)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_login_name(
    pool: &PgPool,
    login_name: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE login_name = $1")
        .bind(login_name)
        .fetch_optional(pool)
        .await
}

/// Partial update: NULL binds leave the column as-is.
pub async fn update_partial(pool: &PgPool, patch: &UserPatch) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET
             login_name = COALESCE($2, login_name),
             password_hash = COALESCE($3, password_hash),
             salt = COALESCE($4, salt),
             login_ip = COALESCE($5, login_ip),
             login_at = COALESCE($6, login_at),
             updated_at = COALESCE($7, updated_at)
         WHERE id = $1",
    )
    .bind(patch.id)
    .bind(&patch.login_name)
    .bind(&patch.password_hash)
    .bind(&patch.salt)
    .bind(&patch.login_ip)
    .bind(patch.login_at)
    .bind(patch.updated_at)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
