use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{UserCredentialId, UserName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Creates a credential, or replaces one when `id` is given.
pub struct RegisterForm {
    pub id: Option<i32>,
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Validated registration request; the password is still plain text.
#[derive(Debug)]
pub struct RegisterPayload {
    pub id: Option<UserCredentialId>,
    pub user_name: UserName,
    pub password: String,
    pub is_active: bool,
}

impl TryFrom<RegisterForm> for RegisterPayload {
    type Error = FormError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(RegisterPayload {
            id: form.id.map(UserCredentialId::new).transpose()?,
            user_name: UserName::new(form.user_name)?,
            password: form.password,
            is_active: form.is_active,
        })
    }
}

#[derive(Debug, Deserialize)]
/// Flips the active flag of the named credential.
pub struct ActivationForm {
    pub user_name: String,
}
