use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::CustomerDraft;
use crate::domain::types::{CustomerId, Email, PersonName, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Payload of `POST /customers` and `PUT /customers`.
pub struct SaveCustomerForm {
    pub id: Option<i32>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    pub phone_number: String,
    #[validate(email)]
    pub email: String,
    /// Birth date, `YYYY-MM-DD`.
    pub bod: NaiveDate,
}

impl TryFrom<SaveCustomerForm> for CustomerDraft {
    type Error = FormError;

    fn try_from(form: SaveCustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(CustomerDraft {
            id: form.id.map(CustomerId::new).transpose()?,
            first_name: PersonName::new(form.first_name)?,
            last_name: form.last_name.trim().to_string(),
            address: form.address.trim().to_string(),
            phone_number: PhoneNumber::new(form.phone_number)?,
            email: Email::new(form.email)?,
            bod: form.bod,
            credential: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_payload_converts_into_draft() {
        let form: SaveCustomerForm = serde_json::from_value(serde_json::json!({
            "first_name": "Budi",
            "phone_number": "+62 812 1111 2222",
            "email": "Budi@Example.com",
            "bod": "1990-04-01",
        }))
        .unwrap();

        let draft = CustomerDraft::try_from(form).unwrap();
        assert_eq!(draft.email.as_str(), "budi@example.com");
        assert_eq!(draft.phone_number.as_str(), "+6281211112222");
        assert!(draft.id.is_none());
        assert!(draft.credential.is_none());
    }

    #[test]
    fn invalid_email_is_rejected() {
        let form = SaveCustomerForm {
            id: None,
            first_name: "Budi".to_string(),
            last_name: String::new(),
            address: String::new(),
            phone_number: "+6281211112222".to_string(),
            email: "nope".to_string(),
            bod: NaiveDate::from_ymd_opt(1990, 4, 1).unwrap(),
        };
        assert!(matches!(
            CustomerDraft::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
