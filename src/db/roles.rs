use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Role;

pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Role>, sqlx::Error> {
    sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = ANY($1) ORDER BY name")
        .bind(ids)
        .fetch_all(pool)
        .await
}
