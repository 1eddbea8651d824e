use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    /// Permission code granted by this role, e.g. "system:user:edit".
    pub role_key: String,
    pub disabled: bool,
    pub deleted: bool,
}

impl Role {
    /// Only active roles contribute to a user's permission set.
    pub fn is_active(&self) -> bool {
        !self.disabled && !self.deleted
    }
}

/// What to do with a user's role links on create/update.
///
/// The legacy comma-separated format conflated "no change" with "clear":
/// a blank string meant no change, and clearing was impossible to express.
/// Callers that need to remove all links use `Clear` directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSelection {
    Unchanged,
    Clear,
    Replace(Vec<Uuid>),
}

impl RoleSelection {
    /// Parse the legacy comma-separated role-id format.
    ///
    /// Blank input maps to `Unchanged`, matching the legacy no-op. Empty
    /// segments are skipped; a malformed id fails the whole parse.
    pub fn from_csv(csv: &str) -> Result<Self, Error> {
        let ids: Vec<Uuid> = csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Uuid::parse_str(s)
                    .map_err(|e| Error::Validation(format!("invalid role id '{s}': {e}")))
            })
            .collect::<Result<_, _>>()?;

        if ids.is_empty() {
            Ok(RoleSelection::Unchanged)
        } else {
            Ok(RoleSelection::Replace(ids))
        }
    }
}
