use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::customer::{Customer, CustomerDraft};
use crate::domain::types::{CustomerId, Email, PhoneNumber};
use crate::models::customer::{
    Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
};
use crate::models::user::NewUserCredential as DbNewUserCredential;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ContactReader, DieselRepository, EntityReader, EntityWriter, ListQuery, parse_filter,
    unknown_filter,
};
use crate::schema::{customers, user_credentials};

type BoxedCustomerQuery = customers::BoxedQuery<'static, Sqlite>;

fn live_customers() -> BoxedCustomerQuery {
    customers::table
        .filter(customers::deleted_at.is_null())
        .into_boxed::<Sqlite>()
}

fn filtered_customers(query: &ListQuery) -> RepositoryResult<BoxedCustomerQuery> {
    let mut items = live_customers();
    for (field, value) in &query.filter {
        items = match field.as_str() {
            "id" => items.filter(customers::id.eq(parse_filter::<i32>(field, value)?)),
            "first_name" => items.filter(customers::first_name.eq(value.clone())),
            "last_name" => items.filter(customers::last_name.eq(value.clone())),
            "address" => items.filter(customers::address.eq(value.clone())),
            "email" => items.filter(customers::email.eq(value.trim().to_lowercase())),
            "phone_number" => {
                let phone = PhoneNumber::new(value.as_str()).map_err(RepositoryError::from)?;
                items.filter(customers::phone_number.eq(phone.into_inner()))
            }
            other => return Err(unknown_filter(other)),
        };
    }
    Ok(items)
}

fn into_domain(customer: DbCustomer) -> RepositoryResult<Customer> {
    Customer::try_from(customer).map_err(RepositoryError::from)
}

/// Loads the live customers among `ids`, keyed by id.
pub(crate) fn live_customers_by_id(
    conn: &mut SqliteConnection,
    ids: Vec<i32>,
) -> RepositoryResult<HashMap<CustomerId, Customer>> {
    live_customers()
        .filter(customers::id.eq_any(ids))
        .load::<DbCustomer>(conn)?
        .into_iter()
        .map(|row| into_domain(row).map(|customer| (customer.id, customer)))
        .collect()
}

impl EntityReader<Customer> for DieselRepository {
    fn get(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        let mut conn = self.conn()?;
        live_customers()
            .filter(customers::id.eq(id.get()))
            .first::<DbCustomer>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Customer>)> {
        let mut conn = self.conn()?;

        let total = filtered_customers(query)?
            .count()
            .get_result::<i64>(&mut conn)?;

        let items = order_by!(filtered_customers(query)?, customers::id, query.order_by.as_str(), query.sort, {
            "id" => customers::id,
            "first_name" => customers::first_name,
            "last_name" => customers::last_name,
            "email" => customers::email,
            "phone_number" => customers::phone_number,
            "bod" => customers::bod,
            "created_at" => customers::created_at,
            "updated_at" => customers::updated_at,
        })?;

        let customers = items
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((usize::try_from(total).unwrap_or_default(), customers))
    }
}

impl EntityWriter<Customer> for DieselRepository {
    fn save(&self, draft: &CustomerDraft) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;

        let db_customer = match draft.id {
            None => conn.transaction::<DbCustomer, RepositoryError, _>(|conn| {
                let credential_id = match &draft.credential {
                    Some(credential) => Some(
                        diesel::insert_into(user_credentials::table)
                            .values(DbNewUserCredential::from(credential))
                            .returning(user_credentials::id)
                            .get_result::<i32>(conn)?,
                    ),
                    None => None,
                };

                Ok(diesel::insert_into(customers::table)
                    .values(DbNewCustomer::new(draft, credential_id))
                    .get_result::<DbCustomer>(conn)?)
            })?,
            Some(id) => diesel::update(
                customers::table
                    .filter(customers::id.eq(id.get()))
                    .filter(customers::deleted_at.is_null()),
            )
            .set(DbUpdateCustomer::new(draft, Utc::now().naive_utc()))
            .get_result::<DbCustomer>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?,
        };

        into_domain(db_customer)
    }

    /// Soft deletes the customer and drops their login, freeing the user name.
    fn delete(&self, id: CustomerId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let credential_id = live_customers()
                .filter(customers::id.eq(id.get()))
                .select(customers::user_credential_id)
                .first::<Option<i32>>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            diesel::update(customers::table.find(id.get()))
                .set((
                    customers::deleted_at.eq(Some(Utc::now().naive_utc())),
                    customers::user_credential_id.eq(None::<i32>),
                ))
                .execute(conn)?;

            if let Some(credential_id) = credential_id {
                diesel::delete(user_credentials::table.find(credential_id)).execute(conn)?;
            }
            Ok(())
        })
    }
}

impl ContactReader<Customer> for DieselRepository {
    fn get_by_email(&self, email: &Email) -> RepositoryResult<Option<Customer>> {
        let mut conn = self.conn()?;
        live_customers()
            .filter(customers::email.eq(email.as_str().to_string()))
            .first::<DbCustomer>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn get_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<Customer>> {
        let mut conn = self.conn()?;
        live_customers()
            .filter(customers::phone_number.eq(phone.as_str().to_string()))
            .first::<DbCustomer>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }
}
