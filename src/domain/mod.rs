//! Domain aggregates exposed by the dealership service layer.

use std::fmt::{Debug, Display};

use crate::domain::types::TypeConstraintError;

pub mod brand;
pub mod customer;
pub mod employee;
pub mod transaction;
pub mod types;
pub mod user;
pub mod vehicle;

/// Aggregate stored in its own table and addressed by a typed identifier.
///
/// The generic repository and service contracts are written once against
/// this trait and implemented per entity.
pub trait Entity {
    type Id: Copy + Debug + Display + PartialEq + TryFrom<i32, Error = TypeConstraintError>;
    /// Payload accepted by `save`; an absent id inserts a new row.
    type Draft;

    /// Lower-case singular name used in user-facing messages.
    const NAME: &'static str;

    fn id(&self) -> Self::Id;
}
