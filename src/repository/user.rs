use chrono::Utc;
use diesel::prelude::*;

use crate::domain::types::{UserCredentialId, UserName};
use crate::domain::user::{CredentialDraft, UserCredential};
use crate::models::user::{
    NewUserCredential as DbNewUserCredential, UpdateUserCredential as DbUpdateUserCredential,
    UserCredential as DbUserCredential,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CredentialReader, CredentialWriter, DieselRepository};
use crate::schema::user_credentials;

fn into_domain(credential: DbUserCredential) -> RepositoryResult<UserCredential> {
    UserCredential::try_from(credential).map_err(RepositoryError::from)
}

impl CredentialReader for DieselRepository {
    fn get_credential_by_id(
        &self,
        id: UserCredentialId,
    ) -> RepositoryResult<Option<UserCredential>> {
        let mut conn = self.conn()?;
        user_credentials::table
            .find(id.get())
            .first::<DbUserCredential>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn get_credential_by_user_name(
        &self,
        user_name: &UserName,
    ) -> RepositoryResult<Option<UserCredential>> {
        let mut conn = self.conn()?;
        user_credentials::table
            .filter(user_credentials::user_name.eq(user_name.as_str()))
            .first::<DbUserCredential>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }
}

impl CredentialWriter for DieselRepository {
    fn save_credential(&self, draft: &CredentialDraft) -> RepositoryResult<UserCredential> {
        let mut conn = self.conn()?;

        let db_credential = match draft.id {
            None => diesel::insert_into(user_credentials::table)
                .values(DbNewUserCredential::from(draft))
                .get_result::<DbUserCredential>(&mut conn)?,
            Some(id) => diesel::update(user_credentials::table.find(id.get()))
                .set(DbUpdateUserCredential::new(draft, Utc::now().naive_utc()))
                .get_result::<DbUserCredential>(&mut conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?,
        };

        into_domain(db_credential)
    }

    fn set_credential_active(
        &self,
        id: UserCredentialId,
        is_active: bool,
    ) -> RepositoryResult<UserCredential> {
        let mut conn = self.conn()?;

        let db_credential = diesel::update(user_credentials::table.find(id.get()))
            .set((
                user_credentials::is_active.eq(is_active),
                user_credentials::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbUserCredential>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        into_domain(db_credential)
    }
}
