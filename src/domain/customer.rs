use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::Entity;
use crate::domain::types::{CustomerId, Email, PersonName, PhoneNumber, UserCredentialId};
use crate::domain::user::CredentialDraft;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: PersonName,
    pub last_name: String,
    pub address: String,
    pub phone_number: PhoneNumber,
    pub email: Email,
    pub bod: NaiveDate,
    pub user_credential_id: Option<UserCredentialId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert-or-update payload for a [`Customer`].
///
/// `credential` is only honoured on insert, where it is stored in the same
/// database transaction as the customer row.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomerDraft {
    pub id: Option<CustomerId>,
    pub first_name: PersonName,
    pub last_name: String,
    pub address: String,
    pub phone_number: PhoneNumber,
    pub email: Email,
    pub bod: NaiveDate,
    pub credential: Option<CredentialDraft>,
}

impl Entity for Customer {
    type Id = CustomerId;
    type Draft = CustomerDraft;

    const NAME: &'static str = "customer";

    fn id(&self) -> CustomerId {
        self.id
    }
}
