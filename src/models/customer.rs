use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::customer::{Customer as DomainCustomer, CustomerDraft as DomainCustomerDraft};
use crate::domain::types::{
    CustomerId, Email, PersonName, PhoneNumber, TypeConstraintError, UserCredentialId,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub bod: NaiveDate,
    pub user_credential_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
    pub bod: NaiveDate,
    pub user_credential_id: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
pub struct UpdateCustomer<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
    pub bod: NaiveDate,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::new(customer.id)?,
            first_name: PersonName::new(customer.first_name)?,
            last_name: customer.last_name,
            address: customer.address,
            phone_number: PhoneNumber::new(customer.phone_number)?,
            email: Email::new(customer.email)?,
            bod: customer.bod,
            user_credential_id: customer
                .user_credential_id
                .map(UserCredentialId::new)
                .transpose()?,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        })
    }
}

impl<'a> NewCustomer<'a> {
    pub fn new(draft: &'a DomainCustomerDraft, user_credential_id: Option<i32>) -> Self {
        Self {
            first_name: draft.first_name.as_str(),
            last_name: draft.last_name.as_str(),
            address: draft.address.as_str(),
            phone_number: draft.phone_number.as_str(),
            email: draft.email.as_str(),
            bod: draft.bod,
            user_credential_id,
        }
    }
}

impl<'a> UpdateCustomer<'a> {
    pub fn new(draft: &'a DomainCustomerDraft, updated_at: NaiveDateTime) -> Self {
        Self {
            first_name: draft.first_name.as_str(),
            last_name: draft.last_name.as_str(),
            address: draft.address.as_str(),
            phone_number: draft.phone_number.as_str(),
            email: draft.email.as_str(),
            bod: draft.bod,
            updated_at,
        }
    }
}
