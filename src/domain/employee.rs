use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::Entity;
use crate::domain::types::{
    Amount, Email, EmployeeId, PersonName, PhoneNumber, Position, UserCredentialId,
};
use crate::domain::user::CredentialDraft;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: PersonName,
    pub last_name: String,
    pub address: String,
    pub phone_number: PhoneNumber,
    pub email: Email,
    pub bod: NaiveDate,
    pub position: Position,
    pub salary: Amount,
    pub manager_id: Option<EmployeeId>,
    pub user_credential_id: Option<UserCredentialId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// An employee with their live manager embedded.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EmployeeDetails {
    #[serde(flatten)]
    pub employee: Employee,
    pub manager: Option<Employee>,
}

/// Insert-or-update payload for an [`Employee`].
#[derive(Clone, Debug, PartialEq)]
pub struct EmployeeDraft {
    pub id: Option<EmployeeId>,
    pub first_name: PersonName,
    pub last_name: String,
    pub address: String,
    pub phone_number: PhoneNumber,
    pub email: Email,
    pub bod: NaiveDate,
    pub position: Position,
    pub salary: Amount,
    pub manager_id: Option<EmployeeId>,
    pub credential: Option<CredentialDraft>,
}

impl Entity for Employee {
    type Id = EmployeeId;
    type Draft = EmployeeDraft;

    const NAME: &'static str = "employee";

    fn id(&self) -> EmployeeId {
        self.id
    }
}
