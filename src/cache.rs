use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::error::Error;
use crate::models::RoleSelection;
use crate::service::AccountService;

/// Caching wrapper for the permission-resolution calls, keyed by user id.
///
/// Resolution results only go stale when the user's links change, so the
/// wrapper invalidates on its own relink path; hosts call `invalidate`
/// themselves after edits this crate never sees (role disable, menu edits).
pub struct CachedResolver {
    service: AccountService,
    role_keys: DashMap<Uuid, Arc<HashSet<String>>>,
    menu_perms: DashMap<Uuid, Arc<HashSet<String>>>,
}

impl CachedResolver {
    pub fn new(service: AccountService) -> Self {
        CachedResolver {
            service,
            role_keys: DashMap::new(),
            menu_perms: DashMap::new(),
        }
    }

    pub fn service(&self) -> &AccountService {
        &self.service
    }

    pub async fn role_keys(&self, user_id: Uuid) -> Result<Arc<HashSet<String>>, Error> {
        if let Some(hit) = self.role_keys.get(&user_id) {
            return Ok(Arc::clone(&hit));
        }
        let keys = Arc::new(self.service.role_keys(user_id).await?);
        self.role_keys.insert(user_id, keys.clone());
        Ok(keys)
    }

    pub async fn menu_permissions(&self, user_id: Uuid) -> Result<Arc<HashSet<String>>, Error> {
        if let Some(hit) = self.menu_perms.get(&user_id) {
            return Ok(Arc::clone(&hit));
        }
        let perms = Arc::new(self.service.menu_permissions(user_id).await?);
        self.menu_perms.insert(user_id, perms.clone());
        Ok(perms)
    }

    /// Relink through the cache so the user's entries are dropped in the
    /// same call. `Unchanged` touches nothing and keeps the cache warm.
    pub async fn rebuild_role_links(
        &self,
        user_id: Uuid,
        selection: RoleSelection,
    ) -> Result<(), Error> {
        let changes = !matches!(selection, RoleSelection::Unchanged);
        self.service.rebuild_role_links(user_id, selection).await?;
        if changes {
            self.invalidate(user_id);
        }
        Ok(())
    }

    pub fn invalidate(&self, user_id: Uuid) {
        self.role_keys.remove(&user_id);
        self.menu_perms.remove(&user_id);
    }
}
