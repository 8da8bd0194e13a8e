use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{UserCredentialId, UserName};

/// Login credential shared by customers and employees.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UserCredential {
    pub id: UserCredentialId,
    pub user_name: UserName,
    /// bcrypt hash, never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert-or-update payload for a [`UserCredential`]. `password` is already hashed.
#[derive(Clone, Debug, PartialEq)]
pub struct CredentialDraft {
    pub id: Option<UserCredentialId>,
    pub user_name: UserName,
    pub password: String,
    pub is_active: bool,
}

impl CredentialDraft {
    /// Inactive credential provisioned alongside a new customer or employee.
    #[must_use]
    pub fn provisioned(user_name: UserName, password_hash: String) -> Self {
        Self {
            id: None,
            user_name,
            password: password_hash,
            is_active: false,
        }
    }
}
