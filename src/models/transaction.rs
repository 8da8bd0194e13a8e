use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::transaction::Transaction as DomainTransaction;
use crate::domain::types::{
    Amount, CustomerId, EmployeeId, TransactionId, TypeConstraintError, VehicleId,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::transactions)]
/// Diesel model for [`crate::domain::transaction::Transaction`].
pub struct Transaction {
    pub id: i32,
    pub transaction_date: NaiveDateTime,
    pub vehicle_id: i32,
    pub customer_id: i32,
    pub employee_id: i32,
    pub transaction_type: String,
    pub payment_amount: i64,
    pub qty: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction {
    pub transaction_date: NaiveDateTime,
    pub vehicle_id: i32,
    pub customer_id: i32,
    pub employee_id: i32,
    pub transaction_type: String,
    pub payment_amount: i64,
    pub qty: i32,
}

impl TryFrom<Transaction> for DomainTransaction {
    type Error = TypeConstraintError;

    fn try_from(transaction: Transaction) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TransactionId::new(transaction.id)?,
            transaction_date: transaction.transaction_date,
            vehicle_id: VehicleId::new(transaction.vehicle_id)?,
            customer_id: CustomerId::new(transaction.customer_id)?,
            employee_id: EmployeeId::new(transaction.employee_id)?,
            transaction_type: transaction.transaction_type.parse()?,
            payment_amount: Amount::new(transaction.payment_amount)?,
            qty: transaction.qty,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        })
    }
}
