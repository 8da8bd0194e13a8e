//! Login, registration and activation of credentials.

use crate::auth::{TokenService, hash_password, verify_password};
use crate::domain::types::UserName;
use crate::domain::user::{CredentialDraft, UserCredential};
use crate::forms::auth::{ActivationForm, LoginForm, RegisterForm, RegisterPayload};
use crate::repository::{CredentialReader, CredentialWriter};
use crate::services::{ServiceError, ServiceResult};

const BAD_CREDENTIALS: &str = "invalid user name or password";

/// Checks the password of an active credential and issues an access token.
///
/// Unknown, inactive and wrong-password logins fail alike.
pub fn login<R>(repo: &R, tokens: &TokenService, form: LoginForm) -> ServiceResult<String>
where
    R: CredentialReader + ?Sized,
{
    let unauthorized = || ServiceError::Unauthorized(BAD_CREDENTIALS.to_string());

    let user_name = UserName::new(form.user_name).map_err(|_| unauthorized())?;
    let credential = repo
        .get_credential_by_user_name(&user_name)?
        .ok_or_else(unauthorized)?;

    if !credential.is_active {
        log::warn!("Login attempt for inactive user {user_name}");
        return Err(unauthorized());
    }
    if !verify_password(&form.password, &credential.password)? {
        return Err(unauthorized());
    }

    Ok(tokens.issue(&credential)?)
}

/// Creates a credential, or replaces the one named by `id`.
pub fn register<R>(repo: &R, form: RegisterForm) -> ServiceResult<UserCredential>
where
    R: CredentialReader + CredentialWriter + ?Sized,
{
    let payload = RegisterPayload::try_from(form)?;

    if let Some(id) = payload.id {
        if repo.get_credential_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "credential with ID {id} not found"
            )));
        }
    }

    let taken = repo
        .get_credential_by_user_name(&payload.user_name)?
        .is_some_and(|other| Some(other.id) != payload.id);
    if taken {
        return Err(ServiceError::Conflict(format!(
            "user {} already exists",
            payload.user_name
        )));
    }

    let draft = CredentialDraft {
        id: payload.id,
        user_name: payload.user_name,
        password: hash_password(&payload.password)?,
        is_active: payload.is_active,
    };
    Ok(repo.save_credential(&draft)?)
}

/// Flips the active flag of the named credential.
pub fn toggle_activation<R>(repo: &R, form: ActivationForm) -> ServiceResult<UserCredential>
where
    R: CredentialReader + CredentialWriter + ?Sized,
{
    let user_name = UserName::new(form.user_name)?;
    let credential = repo
        .get_credential_by_user_name(&user_name)?
        .ok_or_else(|| ServiceError::NotFound(format!("user {user_name} not found")))?;

    Ok(repo.set_credential_active(credential.id, !credential.is_active)?)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::UserCredentialId;
    use crate::repository::mock::MockCredentialRepository;

    fn credential(id: i32, name: &str, password: &str, is_active: bool) -> UserCredential {
        let now = Utc::now().naive_utc();
        UserCredential {
            id: UserCredentialId::new(id).unwrap(),
            user_name: UserName::new(name).unwrap(),
            password: hash_password(password).unwrap(),
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn login_form(password: &str) -> LoginForm {
        LoginForm {
            user_name: "admin".to_string(),
            password: password.to_string(),
        }
    }

    fn register_form(id: Option<i32>) -> RegisterForm {
        RegisterForm {
            id,
            user_name: "admin".to_string(),
            password: "s3cret".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn active_user_gets_a_token() {
        let tokens = TokenService::new("secret", 5);
        let mut repo = MockCredentialRepository::new();
        repo.expect_get_credential_by_user_name()
            .withf(|name| name.as_str() == "admin")
            .returning(|_| Ok(Some(credential(1, "admin", "s3cret", true))));

        let token = login(&repo, &tokens, login_form("s3cret")).unwrap();
        assert_eq!(tokens.verify(&token).unwrap().user_name, "admin");
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let tokens = TokenService::new("secret", 5);
        let mut repo = MockCredentialRepository::new();
        repo.expect_get_credential_by_user_name()
            .returning(|_| Ok(Some(credential(1, "admin", "s3cret", true))));

        assert!(matches!(
            login(&repo, &tokens, login_form("guess")),
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn inactive_user_is_unauthorized() {
        let tokens = TokenService::new("secret", 5);
        let mut repo = MockCredentialRepository::new();
        repo.expect_get_credential_by_user_name()
            .returning(|_| Ok(Some(credential(1, "admin", "s3cret", false))));

        assert!(matches!(
            login(&repo, &tokens, login_form("s3cret")),
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn register_hashes_the_password() {
        let mut repo = MockCredentialRepository::new();
        repo.expect_get_credential_by_user_name().returning(|_| Ok(None));
        repo.expect_save_credential()
            .withf(|draft| {
                draft.password != "s3cret"
                    && verify_password("s3cret", &draft.password).unwrap_or(false)
            })
            .times(1)
            .returning(|draft| {
                let mut saved = credential(3, draft.user_name.as_str(), "x", draft.is_active);
                saved.password = draft.password.clone();
                Ok(saved)
            });

        let saved = register(&repo, register_form(None)).unwrap();
        assert_eq!(saved.id.get(), 3);
    }

    #[test]
    fn register_rejects_taken_user_name() {
        let mut repo = MockCredentialRepository::new();
        repo.expect_get_credential_by_user_name()
            .returning(|_| Ok(Some(credential(9, "admin", "x", true))));
        repo.expect_save_credential().never();

        assert!(matches!(
            register(&repo, register_form(None)),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn register_with_unknown_id_is_not_found() {
        let mut repo = MockCredentialRepository::new();
        repo.expect_get_credential_by_id().returning(|_| Ok(None));
        repo.expect_save_credential().never();

        assert!(matches!(
            register(&repo, register_form(Some(4))),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn activation_flips_the_flag() {
        let mut repo = MockCredentialRepository::new();
        repo.expect_get_credential_by_user_name()
            .returning(|_| Ok(Some(credential(2, "admin", "x", false))));
        repo.expect_set_credential_active()
            .withf(|id, is_active| id.get() == 2 && *is_active)
            .times(1)
            .returning(|_, is_active| Ok(credential(2, "admin", "x", is_active)));

        assert!(toggle_activation(&repo, ActivationForm { user_name: "admin".to_string() })
            .unwrap()
            .is_active);
    }
}
