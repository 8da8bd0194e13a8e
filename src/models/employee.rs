use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::employee::{Employee as DomainEmployee, EmployeeDraft as DomainEmployeeDraft};
use crate::domain::types::{
    Amount, Email, EmployeeId, PersonName, PhoneNumber, Position, TypeConstraintError,
    UserCredentialId,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::employees)]
/// Diesel model for [`crate::domain::employee::Employee`].
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub bod: NaiveDate,
    pub position: String,
    pub salary: i64,
    pub manager_id: Option<i32>,
    pub user_credential_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::employees)]
pub struct NewEmployee<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
    pub bod: NaiveDate,
    pub position: &'a str,
    pub salary: i64,
    pub manager_id: Option<i32>,
    pub user_credential_id: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(treat_none_as_null = true)]
/// Update set for an [`Employee`]; a `None` manager clears the reporting line.
pub struct UpdateEmployee<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
    pub bod: NaiveDate,
    pub position: &'a str,
    pub salary: i64,
    pub manager_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Employee> for DomainEmployee {
    type Error = TypeConstraintError;

    fn try_from(employee: Employee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmployeeId::new(employee.id)?,
            first_name: PersonName::new(employee.first_name)?,
            last_name: employee.last_name,
            address: employee.address,
            phone_number: PhoneNumber::new(employee.phone_number)?,
            email: Email::new(employee.email)?,
            bod: employee.bod,
            position: Position::new(employee.position)?,
            salary: Amount::new(employee.salary)?,
            manager_id: employee.manager_id.map(EmployeeId::new).transpose()?,
            user_credential_id: employee
                .user_credential_id
                .map(UserCredentialId::new)
                .transpose()?,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        })
    }
}

impl<'a> NewEmployee<'a> {
    pub fn new(draft: &'a DomainEmployeeDraft, user_credential_id: Option<i32>) -> Self {
        Self {
            first_name: draft.first_name.as_str(),
            last_name: draft.last_name.as_str(),
            address: draft.address.as_str(),
            phone_number: draft.phone_number.as_str(),
            email: draft.email.as_str(),
            bod: draft.bod,
            position: draft.position.as_str(),
            salary: draft.salary.get(),
            manager_id: draft.manager_id.map(EmployeeId::get),
            user_credential_id,
        }
    }
}

impl<'a> UpdateEmployee<'a> {
    pub fn new(draft: &'a DomainEmployeeDraft, updated_at: NaiveDateTime) -> Self {
        Self {
            first_name: draft.first_name.as_str(),
            last_name: draft.last_name.as_str(),
            address: draft.address.as_str(),
            phone_number: draft.phone_number.as_str(),
            email: draft.email.as_str(),
            bod: draft.bod,
            position: draft.position.as_str(),
            salary: draft.salary.get(),
            manager_id: draft.manager_id.map(EmployeeId::get),
            updated_at,
        }
    }
}
