//! Value objects checked once at the boundary.
//!
//! Identifiers are positive, names are trimmed and non-empty, emails are
//! lower-cased and phone numbers are stored in E.164 form.

use std::fmt::{Display, Formatter};
use std::ops::Deref;

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    #[error("id must be greater than zero")]
    NonPositiveId,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("value cannot be empty")]
    EmptyString,
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("invalid phone number")]
    InvalidPhone,
}

fn normalize_email(email: String) -> Result<String, TypeConstraintError> {
    let normalized = email.trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Positive `i32` row identifier.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                (value > 0)
                    .then_some(Self(value))
                    .ok_or(TypeConstraintError::NonPositiveId)
            }

            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                Display::fmt(&self.0, f)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.get()
            }
        }
    };
}

id_newtype!(BrandId, "Unique identifier for a vehicle brand.");
id_newtype!(VehicleId, "Unique identifier for a vehicle.");
id_newtype!(CustomerId, "Unique identifier for a customer.");
id_newtype!(EmployeeId, "Unique identifier for an employee.");
id_newtype!(TransactionId, "Unique identifier for a sales transaction.");
id_newtype!(UserCredentialId, "Unique identifier for a login credential.");

fn non_empty(value: String) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    Ok(trimmed.to_string())
}

fn normalize_phone(value: String) -> Result<String, TypeConstraintError> {
    let trimmed = non_empty(value)?;
    let parsed = parse(None, &trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// String wrapper whose constructor runs `$normalize` on the raw input.
macro_rules! string_newtype {
    ($name:ident, $normalize:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                $normalize(value.into()).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_newtype!(Email, normalize_email, "Lower-cased, validated email address.");
string_newtype!(PhoneNumber, normalize_phone, "Phone number normalized to E.164.");
string_newtype!(BrandName, non_empty, "Name of a vehicle brand.");
string_newtype!(VehicleModel, non_empty, "Model name of a vehicle.");
string_newtype!(Color, non_empty, "Body color of a vehicle.");
string_newtype!(PersonName, non_empty, "First name of a customer or employee.");
string_newtype!(Position, non_empty, "Job title of an employee.");
string_newtype!(UserName, non_empty, "Login name of a credential.");

/// Non-negative amount of money in the smallest currency unit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64")]
pub struct Amount(i64);

impl Amount {
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value < 0 {
            return Err(TypeConstraintError::InvalidValue(format!(
                "amount must not be negative, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = TypeConstraintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
