use std::sync::Arc;

use uuid::Uuid;

use userbase::models::{NewUser, Role, RoleSelection, User};
use userbase::service::AccountService;
use userbase::store::MemoryStore;

/// Service wired to a fresh in-memory store acting as all three
/// collaborators.
pub struct TestService {
    pub store: Arc<MemoryStore>,
    pub service: AccountService,
}

pub fn service() -> TestService {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let store = Arc::new(MemoryStore::new());
    let service = AccountService::new(store.clone(), store.clone(), store.clone());
    TestService { store, service }
}

impl TestService {
    /// Seed a role record, returning its id.
    pub fn seed_role(&self, name: &str, role_key: &str, disabled: bool, deleted: bool) -> Uuid {
        let id = Uuid::now_v7();
        self.store.add_role(Role {
            id,
            name: name.to_string(),
            role_key: role_key.to_string(),
            disabled,
            deleted,
        });
        id
    }

    pub async fn create_user(&self, login_name: &str, password: &str, roles: RoleSelection) -> User {
        self.service
            .create_user(NewUser {
                login_name: login_name.to_string(),
                password: password.to_string(),
                roles,
            })
            .await
            .expect("create user failed")
    }
}
