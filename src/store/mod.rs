pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::models::{Role, User, UserPatch};

/// Persistence seam for user records and their role links.
///
/// `replace_role_links` is atomic: implementations must never expose a
/// window where the old links are gone and the new ones not yet written.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<(), Error>;

    async fn fetch_user(&self, id: Uuid) -> Result<Option<User>, Error>;

    async fn find_by_login_name(&self, login_name: &str) -> Result<Option<User>, Error>;

    /// Partial update; `None` fields are left unchanged. Returns the number
    /// of rows matched.
    async fn update_user(&self, patch: &UserPatch) -> Result<u64, Error>;

    /// Roles currently linked to the user, ordered by role name.
    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>, Error>;

    async fn replace_role_links(&self, user_id: Uuid, role_ids: &[Uuid]) -> Result<(), Error>;

    async fn clear_role_links(&self, user_id: Uuid) -> Result<(), Error>;
}

/// Read access to role records, which are owned elsewhere.
#[async_trait]
pub trait RoleLookup: Send + Sync {
    /// Roles matching the given ids; unknown ids are simply absent from the
    /// result. Ordered by role name.
    async fn roles_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Role>, Error>;
}

/// Menu-derived permission strings for a user.
#[async_trait]
pub trait MenuPermissionLookup: Send + Sync {
    async fn perms_by_user_id(&self, user_id: Uuid) -> Result<Vec<String>, Error>;
}
