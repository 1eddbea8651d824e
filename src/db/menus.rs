use sqlx::PgPool;
use uuid::Uuid;

/// Permission strings of every menu reachable through the user's active
/// roles. Blank filtering is the resolver's job; this only drops NULLs.
pub async fn perms_by_user_id(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT m.perms FROM menus m
         JOIN role_menus rm ON rm.menu_id = m.id
         JOIN roles r ON r.id = rm.role_id
         JOIN user_roles ur ON ur.role_id = r.id
         WHERE ur.user_id = $1
           AND NOT r.disabled AND NOT r.deleted
           AND m.perms IS NOT NULL",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
