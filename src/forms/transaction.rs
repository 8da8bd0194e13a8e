use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::transaction::{NewTransaction, TransactionType};
use crate::domain::types::{Amount, CustomerId, EmployeeId, VehicleId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Payload of `POST /transactions`.
pub struct RegisterTransactionForm {
    /// Defaults to the time of registration.
    pub transaction_date: Option<NaiveDateTime>,
    pub vehicle_id: i32,
    pub customer_id: i32,
    pub employee_id: i32,
    pub transaction_type: String,
    /// Defaults to the vehicle price times `qty`.
    pub payment_amount: Option<i64>,
    #[validate(range(min = 1))]
    pub qty: i32,
}

impl TryFrom<RegisterTransactionForm> for NewTransaction {
    type Error = FormError;

    fn try_from(form: RegisterTransactionForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewTransaction {
            transaction_date: form
                .transaction_date
                .unwrap_or_else(|| Utc::now().naive_utc()),
            vehicle_id: VehicleId::new(form.vehicle_id)?,
            customer_id: CustomerId::new(form.customer_id)?,
            employee_id: EmployeeId::new(form.employee_id)?,
            transaction_type: form.transaction_type.parse::<TransactionType>()?,
            payment_amount: form.payment_amount.map(Amount::new).transpose()?,
            qty: form.qty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(qty: i32) -> RegisterTransactionForm {
        RegisterTransactionForm {
            transaction_date: None,
            vehicle_id: 1,
            customer_id: 2,
            employee_id: 3,
            transaction_type: "online".to_string(),
            payment_amount: None,
            qty,
        }
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(matches!(
            NewTransaction::try_from(form(0)),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn missing_payment_is_left_to_storage() {
        let new_transaction = NewTransaction::try_from(form(2)).unwrap();
        assert_eq!(new_transaction.payment_amount, None);
        assert_eq!(new_transaction.transaction_type, TransactionType::Online);
    }
}
