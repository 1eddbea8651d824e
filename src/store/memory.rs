use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::models::{Role, User, UserPatch};
use crate::store::{MenuPermissionLookup, RoleLookup, UserStore};

/// In-memory store implementing all three collaborator traits. Backs the
/// test suite and works as a lightweight store for embedded hosts.
///
/// Menu permissions are seeded per user id rather than derived through a
/// menu table; the menu lookup is an external collaborator and this is its
/// simplest faithful shape.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    roles: HashMap<Uuid, Role>,
    links: HashMap<Uuid, Vec<Uuid>>,
    menu_perms: HashMap<Uuid, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a role record. Role records are owned by a separate role
    /// manager in production; tests and embedded hosts seed them here.
    pub fn add_role(&self, role: Role) {
        self.inner.write().unwrap().roles.insert(role.id, role);
    }

    pub fn set_menu_perms(&self, user_id: Uuid, perms: Vec<String>) {
        self.inner.write().unwrap().menu_perms.insert(user_id, perms);
    }

    /// Raw link list for a user, in insertion order. Test hook.
    pub fn linked_role_ids(&self, user_id: Uuid) -> Vec<Uuid> {
        self.inner
            .read()
            .unwrap()
            .links
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), Error> {
        let mut inner = self.inner.write().unwrap();
        if inner.users.contains_key(&user.id) {
            return Err(Error::Conflict(format!("user {} already exists", user.id)));
        }
        if inner
            .users
            .values()
            .any(|u| u.login_name == user.login_name)
        {
            return Err(Error::Conflict(format!(
                "login name '{}' already taken",
                user.login_name
            )));
        }
        inner.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn fetch_user(&self, id: Uuid) -> Result<Option<User>, Error> {
        Ok(self.inner.read().unwrap().users.get(&id).cloned())
    }

    async fn find_by_login_name(&self, login_name: &str) -> Result<Option<User>, Error> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .users
            .values()
            .find(|u| u.login_name == login_name)
            .cloned())
    }

    async fn update_user(&self, patch: &UserPatch) -> Result<u64, Error> {
        let mut inner = self.inner.write().unwrap();
        let Some(user) = inner.users.get_mut(&patch.id) else {
            return Ok(0);
        };
        if let Some(login_name) = &patch.login_name {
            user.login_name = login_name.clone();
        }
        if let Some(password_hash) = &patch.password_hash {
            user.password_hash = password_hash.clone();
        }
        if let Some(salt) = &patch.salt {
            user.salt = salt.clone();
        }
        if let Some(login_ip) = &patch.login_ip {
            user.login_ip = Some(login_ip.clone());
        }
        if let Some(login_at) = patch.login_at {
            user.login_at = Some(login_at);
        }
        if let Some(updated_at) = patch.updated_at {
            user.updated_at = updated_at;
        }
        Ok(1)
    }

    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>, Error> {
        let inner = self.inner.read().unwrap();
        let mut roles: Vec<Role> = inner
            .links
            .get(&user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.roles.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn replace_role_links(&self, user_id: Uuid, role_ids: &[Uuid]) -> Result<(), Error> {
        self.inner
            .write()
            .unwrap()
            .links
            .insert(user_id, role_ids.to_vec());
        Ok(())
    }

    async fn clear_role_links(&self, user_id: Uuid) -> Result<(), Error> {
        self.inner.write().unwrap().links.remove(&user_id);
        Ok(())
    }
}

#[async_trait]
impl RoleLookup for MemoryStore {
    async fn roles_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Role>, Error> {
        let inner = self.inner.read().unwrap();
        let mut roles: Vec<Role> = ids
            .iter()
            .filter_map(|id| inner.roles.get(id).cloned())
            .collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }
}

#[async_trait]
impl MenuPermissionLookup for MemoryStore {
    async fn perms_by_user_id(&self, user_id: Uuid) -> Result<Vec<String>, Error> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .menu_perms
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}
