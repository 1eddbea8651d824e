use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::credential;
use crate::error::Error;
use crate::models::{NewUser, RoleSelection, User, UserPatch};
use crate::store::{MenuPermissionLookup, RoleLookup, UserStore};

/// Account service: credential handling, user↔role link maintenance and
/// permission resolution. Collaborators are passed in at construction.
pub struct AccountService {
    store: Arc<dyn UserStore>,
    roles: Arc<dyn RoleLookup>,
    menus: Arc<dyn MenuPermissionLookup>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn UserStore>,
        roles: Arc<dyn RoleLookup>,
        menus: Arc<dyn MenuPermissionLookup>,
    ) -> Self {
        AccountService {
            store,
            roles,
            menus,
        }
    }

    /// Create an account: derive the credential, insert the record, then
    /// apply the role selection.
    ///
    /// The availability check is advisory (two callers can pass it with the
    /// same name); the store's unique constraint on the login name is what
    /// actually guarantees uniqueness, surfacing as `Conflict`.
    pub async fn create_user(&self, new: NewUser) -> Result<User, Error> {
        let login_name = new.login_name.trim();
        if login_name.is_empty() {
            return Err(Error::Validation("login name must not be empty".to_string()));
        }

        let cred = credential::derive(&new.password)?;

        if !self.is_login_name_available(login_name).await? {
            return Err(Error::Conflict(format!(
                "login name '{login_name}' already taken"
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            login_name: login_name.to_string(),
            password_hash: cred.hash,
            salt: cred.salt,
            login_ip: None,
            login_at: None,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_user(&user).await?;
        self.rebuild_role_links(user.id, new.roles).await?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Partial update (`None` fields untouched), then apply the role
    /// selection.
    pub async fn update_user(&self, patch: UserPatch, roles: RoleSelection) -> Result<(), Error> {
        let matched = self.store.update_user(&patch).await?;
        if matched == 0 {
            return Err(Error::NotFound(format!("user {}", patch.id)));
        }
        self.rebuild_role_links(patch.id, roles).await
    }

    /// Re-derive the credential with a fresh salt and persist it along with
    /// a new update timestamp. The old hash stops verifying immediately.
    pub async fn reset_password(&self, user_id: Uuid, new_password: &str) -> Result<(), Error> {
        let cred = credential::derive(new_password)?;

        let mut patch = UserPatch::new(user_id);
        patch.password_hash = Some(cred.hash);
        patch.salt = Some(cred.salt);
        patch.updated_at = Some(Utc::now());

        let matched = self.store.update_user(&patch).await?;
        if matched == 0 {
            return Err(Error::NotFound(format!("user {user_id}")));
        }

        tracing::info!(user_id = %user_id, "password reset");
        Ok(())
    }

    /// Apply a role selection to the user's links.
    ///
    /// `Replace` resolves the ids first and links only the roles that
    /// exist; the clear-and-insert happens atomically in the store.
    pub async fn rebuild_role_links(
        &self,
        user_id: Uuid,
        selection: RoleSelection,
    ) -> Result<(), Error> {
        match selection {
            RoleSelection::Unchanged => Ok(()),
            RoleSelection::Clear => self.store.clear_role_links(user_id).await,
            RoleSelection::Replace(ids) => {
                self.store
                    .fetch_user(user_id)
                    .await?
                    .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;

                let roles = self.roles.roles_by_ids(&ids).await?;
                if roles.len() != ids.len() {
                    tracing::warn!(
                        user_id = %user_id,
                        requested = ids.len(),
                        resolved = roles.len(),
                        "dropping unknown role ids from relink"
                    );
                }
                let role_ids: Vec<Uuid> = roles.iter().map(|r| r.id).collect();
                self.store.replace_role_links(user_id, &role_ids).await
            }
        }
    }

    /// Permission codes of the user's active roles. Disabled or
    /// soft-deleted roles contribute nothing even while linked.
    pub async fn role_keys(&self, user_id: Uuid) -> Result<HashSet<String>, Error> {
        let roles = self.store.roles_for_user(user_id).await?;
        Ok(roles
            .into_iter()
            .filter(|r| r.is_active())
            .map(|r| r.role_key)
            .collect())
    }

    /// Menu-derived permission strings, blanks dropped.
    pub async fn menu_permissions(&self, user_id: Uuid) -> Result<HashSet<String>, Error> {
        let perms = self.menus.perms_by_user_id(user_id).await?;
        Ok(perms
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect())
    }

    /// Linked role names joined with a comma, empty string for no roles.
    pub async fn role_group_label(&self, user_id: Uuid) -> Result<String, Error> {
        self.store
            .fetch_user(user_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;

        let roles = self.store.roles_for_user(user_id).await?;
        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        Ok(names.join(","))
    }

    /// Advisory check only; see `create_user`.
    pub async fn is_login_name_available(&self, login_name: &str) -> Result<bool, Error> {
        Ok(self.store.find_by_login_name(login_name).await?.is_none())
    }

    /// Stamp the record with caller-supplied IP and timestamp.
    pub async fn record_login(
        &self,
        user_id: Uuid,
        ip: IpAddr,
        at: DateTime<Utc>,
    ) -> Result<(), Error> {
        let mut patch = UserPatch::new(user_id);
        patch.login_ip = Some(ip.to_string());
        patch.login_at = Some(at);

        let matched = self.store.update_user(&patch).await?;
        if matched == 0 {
            return Err(Error::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    /// Verify a login attempt. Unknown name and bad password are
    /// indistinguishable to the caller.
    pub async fn authenticate(&self, login_name: &str, password: &str) -> Result<User, Error> {
        let user = self
            .store
            .find_by_login_name(login_name)
            .await?
            .ok_or_else(|| Error::Unauthorized("invalid credentials".to_string()))?;

        if !credential::verify(password, &user.password_hash, &user.salt) {
            return Err(Error::Unauthorized("invalid credentials".to_string()));
        }

        Ok(user)
    }
}
