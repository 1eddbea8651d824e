use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::RoleSelection;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub login_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub salt: String,
    pub login_ip: Option<String>,
    pub login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for account creation. The password is plaintext here; it never
/// reaches the store in that form, and the type stays out of Debug output.
#[derive(Clone)]
pub struct NewUser {
    pub login_name: String,
    pub password: String,
    pub roles: RoleSelection,
}

/// Partial update of a user record. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub id: Uuid,
    pub login_name: Option<String>,
    pub password_hash: Option<String>,
    pub salt: Option<String>,
    pub login_ip: Option<String>,
    pub login_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserPatch {
    pub fn new(id: Uuid) -> Self {
        UserPatch {
            id,
            ..Default::default()
        }
    }
}
