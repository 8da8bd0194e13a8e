use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::Entity;
use crate::domain::customer::Customer;
use crate::domain::employee::Employee;
use crate::domain::types::{
    Amount, CustomerId, EmployeeId, TransactionId, TypeConstraintError, VehicleId,
};
use crate::domain::vehicle::Vehicle;

/// A vehicle sale.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub transaction_date: NaiveDateTime,
    pub vehicle_id: VehicleId,
    pub customer_id: CustomerId,
    pub employee_id: EmployeeId,
    pub transaction_type: TransactionType,
    pub payment_amount: Amount,
    pub qty: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A sale with the records it references embedded.
///
/// A reference that has since been soft deleted is `None`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TransactionDetails {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub vehicle: Option<Vehicle>,
    pub customer: Option<Customer>,
    pub employee: Option<Employee>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Online,
    Offline,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Online => write!(f, "online"),
            TransactionType::Offline => write!(f, "offline"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "online" => Ok(TransactionType::Online),
            "offline" => Ok(TransactionType::Offline),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown transaction type: {other}"
            ))),
        }
    }
}

/// Payload used to register a sale.
///
/// When `payment_amount` is `None` the repository charges
/// `sale_price * qty` of the vehicle at registration time.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub transaction_date: NaiveDateTime,
    pub vehicle_id: VehicleId,
    pub customer_id: CustomerId,
    pub employee_id: EmployeeId,
    pub transaction_type: TransactionType,
    pub payment_amount: Option<Amount>,
    pub qty: i32,
}

impl Entity for Transaction {
    type Id = TransactionId;
    type Draft = NewTransaction;

    const NAME: &'static str = "transaction";

    fn id(&self) -> TransactionId {
        self.id
    }
}
