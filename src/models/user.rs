use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, UserCredentialId, UserName};
use crate::domain::user::{
    CredentialDraft as DomainCredentialDraft, UserCredential as DomainUserCredential,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::user_credentials)]
/// Diesel model for [`crate::domain::user::UserCredential`].
pub struct UserCredential {
    pub id: i32,
    pub user_name: String,
    pub password: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_credentials)]
pub struct NewUserCredential<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::user_credentials)]
pub struct UpdateUserCredential<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserCredential> for DomainUserCredential {
    type Error = TypeConstraintError;

    fn try_from(credential: UserCredential) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserCredentialId::new(credential.id)?,
            user_name: UserName::new(credential.user_name)?,
            password: credential.password,
            is_active: credential.is_active,
            created_at: credential.created_at,
            updated_at: credential.updated_at,
        })
    }
}

impl<'a> From<&'a DomainCredentialDraft> for NewUserCredential<'a> {
    fn from(draft: &'a DomainCredentialDraft) -> Self {
        Self {
            user_name: draft.user_name.as_str(),
            password: draft.password.as_str(),
            is_active: draft.is_active,
        }
    }
}

impl<'a> UpdateUserCredential<'a> {
    pub fn new(draft: &'a DomainCredentialDraft, updated_at: NaiveDateTime) -> Self {
        Self {
            user_name: draft.user_name.as_str(),
            password: draft.password.as_str(),
            is_active: draft.is_active,
            updated_at,
        }
    }
}
