use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::transaction::{
    NewTransaction, Transaction, TransactionDetails, TransactionType,
};
use crate::domain::types::TransactionId;
use crate::models::transaction::{
    NewTransaction as DbNewTransaction, Transaction as DbTransaction,
};
use crate::models::vehicle::Vehicle as DbVehicle;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::customer::live_customers_by_id;
use crate::repository::employee::live_employees_by_id;
use crate::repository::vehicle::live_vehicles_by_id;
use crate::repository::{
    DieselRepository, EntityReader, ListQuery, TransactionReader, TransactionWriter, parse_filter,
    unknown_filter,
};
use crate::schema::{customers, employees, transactions, vehicles};

type BoxedTransactionQuery = transactions::BoxedQuery<'static, Sqlite>;

fn filtered_transactions(query: &ListQuery) -> RepositoryResult<BoxedTransactionQuery> {
    let mut items = transactions::table.into_boxed::<Sqlite>();
    for (field, value) in &query.filter {
        items = match field.as_str() {
            "id" => items.filter(transactions::id.eq(parse_filter::<i32>(field, value)?)),
            "vehicle_id" => {
                items.filter(transactions::vehicle_id.eq(parse_filter::<i32>(field, value)?))
            }
            "customer_id" => {
                items.filter(transactions::customer_id.eq(parse_filter::<i32>(field, value)?))
            }
            "employee_id" => {
                items.filter(transactions::employee_id.eq(parse_filter::<i32>(field, value)?))
            }
            "transaction_type" => {
                let transaction_type = value
                    .parse::<TransactionType>()
                    .map_err(RepositoryError::from)?;
                items.filter(transactions::transaction_type.eq(transaction_type.to_string()))
            }
            other => return Err(unknown_filter(other)),
        };
    }
    Ok(items)
}

fn into_domain(transaction: DbTransaction) -> RepositoryResult<Transaction> {
    Transaction::try_from(transaction).map_err(RepositoryError::from)
}

impl EntityReader<Transaction> for DieselRepository {
    fn get(&self, id: TransactionId) -> RepositoryResult<Option<Transaction>> {
        let mut conn = self.conn()?;
        transactions::table
            .find(id.get())
            .first::<DbTransaction>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Transaction>)> {
        let mut conn = self.conn()?;

        let total = filtered_transactions(query)?
            .count()
            .get_result::<i64>(&mut conn)?;

        let items = order_by!(filtered_transactions(query)?, transactions::id, query.order_by.as_str(), query.sort, {
            "id" => transactions::id,
            "transaction_date" => transactions::transaction_date,
            "vehicle_id" => transactions::vehicle_id,
            "customer_id" => transactions::customer_id,
            "employee_id" => transactions::employee_id,
            "transaction_type" => transactions::transaction_type,
            "payment_amount" => transactions::payment_amount,
            "qty" => transactions::qty,
            "created_at" => transactions::created_at,
        })?;

        let transactions = items
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .load::<DbTransaction>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((usize::try_from(total).unwrap_or_default(), transactions))
    }
}

impl TransactionReader for DieselRepository {
    fn with_parties(
        &self,
        transactions: Vec<Transaction>,
    ) -> RepositoryResult<Vec<TransactionDetails>> {
        if transactions.is_empty() {
            return Ok(Vec::new());
        }

        let vehicle_ids = transactions.iter().map(|t| t.vehicle_id.get()).collect();
        let customer_ids = transactions.iter().map(|t| t.customer_id.get()).collect();
        let employee_ids = transactions.iter().map(|t| t.employee_id.get()).collect();

        let mut conn = self.conn()?;
        let vehicles_by_id = live_vehicles_by_id(&mut conn, vehicle_ids)?;
        let customers_by_id = live_customers_by_id(&mut conn, customer_ids)?;
        let employees_by_id = live_employees_by_id(&mut conn, employee_ids)?;

        Ok(transactions
            .into_iter()
            .map(|transaction| TransactionDetails {
                vehicle: vehicles_by_id.get(&transaction.vehicle_id).cloned(),
                customer: customers_by_id.get(&transaction.customer_id).cloned(),
                employee: employees_by_id.get(&transaction.employee_id).cloned(),
                transaction,
            })
            .collect())
    }
}

impl TransactionWriter for DieselRepository {
    fn register_transaction(
        &self,
        new_transaction: &NewTransaction,
    ) -> RepositoryResult<Transaction> {
        let mut conn = self.conn()?;
        let qty = new_transaction.qty;

        let db_transaction = conn.transaction::<DbTransaction, RepositoryError, _>(|conn| {
            let vehicle = vehicles::table
                .filter(vehicles::id.eq(new_transaction.vehicle_id.get()))
                .filter(vehicles::deleted_at.is_null())
                .first::<DbVehicle>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let customer_exists = diesel::select(diesel::dsl::exists(
                customers::table
                    .filter(customers::id.eq(new_transaction.customer_id.get()))
                    .filter(customers::deleted_at.is_null()),
            ))
            .get_result::<bool>(conn)?;

            let employee_exists = diesel::select(diesel::dsl::exists(
                employees::table
                    .filter(employees::id.eq(new_transaction.employee_id.get()))
                    .filter(employees::deleted_at.is_null()),
            ))
            .get_result::<bool>(conn)?;

            if !customer_exists || !employee_exists {
                return Err(RepositoryError::NotFound);
            }

            if qty < 1 {
                return Err(RepositoryError::ValidationError(format!(
                    "quantity must be at least 1, got {qty}"
                )));
            }

            if vehicle.stock < qty {
                return Err(RepositoryError::ValidationError(format!(
                    "insufficient stock for vehicle {}: requested {qty}, available {}",
                    vehicle.id, vehicle.stock
                )));
            }

            let payment_amount = match new_transaction.payment_amount {
                Some(amount) => amount.get(),
                None => vehicle
                    .sale_price
                    .checked_mul(i64::from(qty))
                    .ok_or_else(|| {
                        RepositoryError::ValidationError("payment amount overflow".to_string())
                    })?,
            };

            diesel::update(vehicles::table.find(vehicle.id))
                .set((
                    vehicles::stock.eq(vehicles::stock - qty),
                    vehicles::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)?;

            Ok(diesel::insert_into(transactions::table)
                .values(DbNewTransaction {
                    transaction_date: new_transaction.transaction_date,
                    vehicle_id: vehicle.id,
                    customer_id: new_transaction.customer_id.get(),
                    employee_id: new_transaction.employee_id.get(),
                    transaction_type: new_transaction.transaction_type.to_string(),
                    payment_amount,
                    qty,
                })
                .get_result::<DbTransaction>(conn)?)
        })?;

        into_domain(db_transaction)
    }
}
