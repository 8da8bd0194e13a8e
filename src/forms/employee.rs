use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::employee::EmployeeDraft;
use crate::domain::types::{Amount, Email, EmployeeId, PersonName, PhoneNumber, Position};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Payload of `POST /employees` and `PUT /employees`.
pub struct SaveEmployeeForm {
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
    pub bod: NaiveDate,
    #[validate(length(min = 1))]
    pub position: String,
    #[validate(range(min = 0))]
    pub salary: i64,
    pub manager_id: Option<i32>,
}

impl TryFrom<SaveEmployeeForm> for EmployeeDraft {
    type Error = FormError;

    fn try_from(form: SaveEmployeeForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(EmployeeDraft {
            id: form.id.map(EmployeeId::new).transpose()?,
            first_name: PersonName::new(form.first_name)?,
            last_name: form.last_name.trim().to_string(),
            address: form.address.trim().to_string(),
            phone_number: PhoneNumber::new(form.phone_number)?,
            email: Email::new(form.email)?,
            bod: form.bod,
            position: Position::new(form.position)?,
            salary: Amount::new(form.salary)?,
            manager_id: form.manager_id.map(EmployeeId::new).transpose()?,
            credential: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_id_must_be_positive() {
        let form = SaveEmployeeForm {
            id: None,
            first_name: "Sari".to_string(),
            last_name: "Dewi".to_string(),
            address: String::new(),
            phone_number: "+6281233334444".to_string(),
            email: "sari@example.com".to_string(),
            bod: NaiveDate::from_ymd_opt(1988, 1, 12).unwrap(),
            position: "Sales".to_string(),
            salary: 7_000_000,
            manager_id: Some(0),
        };
        assert!(matches!(
            EmployeeDraft::try_from(form),
            Err(FormError::Constraint(_))
        ));
    }
}
