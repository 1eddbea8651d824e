use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::db;
use crate::error::Error;
use crate::models::{Role, User, UserPatch};
use crate::store::{MenuPermissionLookup, RoleLookup, UserStore};

/// Postgres-backed store. Expects the `users`, `roles`, `user_roles`,
/// `menus` and `role_menus` tables, with a unique constraint on
/// `users.login_name`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub async fn connect(config: &StoreConfig) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(PgStore::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), Error> {
        db::users::create(&self.pool, user).await?;
        Ok(())
    }

    async fn fetch_user(&self, id: Uuid) -> Result<Option<User>, Error> {
        Ok(db::users::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_login_name(&self, login_name: &str) -> Result<Option<User>, Error> {
        Ok(db::users::find_by_login_name(&self.pool, login_name).await?)
    }

    async fn update_user(&self, patch: &UserPatch) -> Result<u64, Error> {
        Ok(db::users::update_partial(&self.pool, patch).await?)
    }

    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>, Error> {
        Ok(db::user_roles::roles_for_user(&self.pool, user_id).await?)
    }

    async fn replace_role_links(&self, user_id: Uuid, role_ids: &[Uuid]) -> Result<(), Error> {
        db::user_roles::replace(&self.pool, user_id, role_ids).await?;
        Ok(())
    }

    async fn clear_role_links(&self, user_id: Uuid) -> Result<(), Error> {
        db::user_roles::clear(&self.pool, user_id).await?;
        Ok(())
    }
}

#[async_trait]
impl RoleLookup for PgStore {
    async fn roles_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Role>, Error> {
        Ok(db::roles::find_by_ids(&self.pool, ids).await?)
    }
}

#[async_trait]
impl MenuPermissionLookup for PgStore {
    async fn perms_by_user_id(&self, user_id: Uuid) -> Result<Vec<String>, Error> {
        Ok(db::menus::perms_by_user_id(&self.pool, user_id).await?)
    }
}
