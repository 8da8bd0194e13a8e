use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::employee::{Employee, EmployeeDetails, EmployeeDraft};
use crate::domain::types::{Email, EmployeeId, PhoneNumber};
use crate::models::employee::{
    Employee as DbEmployee, NewEmployee as DbNewEmployee, UpdateEmployee as DbUpdateEmployee,
};
use crate::models::user::NewUserCredential as DbNewUserCredential;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ContactReader, DieselRepository, EmployeeReader, EntityReader, EntityWriter, ListQuery,
    parse_filter, unknown_filter,
};
use crate::schema::{employees, user_credentials};

type BoxedEmployeeQuery = employees::BoxedQuery<'static, Sqlite>;

fn live_employees() -> BoxedEmployeeQuery {
    employees::table
        .filter(employees::deleted_at.is_null())
        .into_boxed::<Sqlite>()
}

fn filtered_employees(query: &ListQuery) -> RepositoryResult<BoxedEmployeeQuery> {
    let mut items = live_employees();
    for (field, value) in &query.filter {
        items = match field.as_str() {
            "id" => items.filter(employees::id.eq(parse_filter::<i32>(field, value)?)),
            "first_name" => items.filter(employees::first_name.eq(value.clone())),
            "last_name" => items.filter(employees::last_name.eq(value.clone())),
            "address" => items.filter(employees::address.eq(value.clone())),
            "email" => items.filter(employees::email.eq(value.trim().to_lowercase())),
            "phone_number" => {
                let phone = PhoneNumber::new(value.as_str()).map_err(RepositoryError::from)?;
                items.filter(employees::phone_number.eq(phone.into_inner()))
            }
            "position" => items.filter(employees::position.eq(value.clone())),
            "manager_id" => {
                items.filter(employees::manager_id.eq(parse_filter::<i32>(field, value)?))
            }
            other => return Err(unknown_filter(other)),
        };
    }
    Ok(items)
}

fn into_domain(employee: DbEmployee) -> RepositoryResult<Employee> {
    Employee::try_from(employee).map_err(RepositoryError::from)
}

/// Loads the live employees among `ids`, keyed by id.
pub(crate) fn live_employees_by_id(
    conn: &mut SqliteConnection,
    ids: Vec<i32>,
) -> RepositoryResult<HashMap<EmployeeId, Employee>> {
    live_employees()
        .filter(employees::id.eq_any(ids))
        .load::<DbEmployee>(conn)?
        .into_iter()
        .map(|row| into_domain(row).map(|employee| (employee.id, employee)))
        .collect()
}

impl EntityReader<Employee> for DieselRepository {
    fn get(&self, id: EmployeeId) -> RepositoryResult<Option<Employee>> {
        let mut conn = self.conn()?;
        live_employees()
            .filter(employees::id.eq(id.get()))
            .first::<DbEmployee>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Employee>)> {
        let mut conn = self.conn()?;

        let total = filtered_employees(query)?
            .count()
            .get_result::<i64>(&mut conn)?;

        let items = order_by!(filtered_employees(query)?, employees::id, query.order_by.as_str(), query.sort, {
            "id" => employees::id,
            "first_name" => employees::first_name,
            "last_name" => employees::last_name,
            "email" => employees::email,
            "phone_number" => employees::phone_number,
            "bod" => employees::bod,
            "position" => employees::position,
            "salary" => employees::salary,
            "manager_id" => employees::manager_id,
            "created_at" => employees::created_at,
            "updated_at" => employees::updated_at,
        })?;

        let employees = items
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .load::<DbEmployee>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((usize::try_from(total).unwrap_or_default(), employees))
    }
}

impl EntityWriter<Employee> for DieselRepository {
    fn save(&self, draft: &EmployeeDraft) -> RepositoryResult<Employee> {
        let mut conn = self.conn()?;

        let db_employee = match draft.id {
            None => conn.transaction::<DbEmployee, RepositoryError, _>(|conn| {
                let credential_id = match &draft.credential {
                    Some(credential) => Some(
                        diesel::insert_into(user_credentials::table)
                            .values(DbNewUserCredential::from(credential))
                            .returning(user_credentials::id)
                            .get_result::<i32>(conn)?,
                    ),
                    None => None,
                };

                Ok(diesel::insert_into(employees::table)
                    .values(DbNewEmployee::new(draft, credential_id))
                    .get_result::<DbEmployee>(conn)?)
            })?,
            Some(id) => diesel::update(
                employees::table
                    .filter(employees::id.eq(id.get()))
                    .filter(employees::deleted_at.is_null()),
            )
            .set(DbUpdateEmployee::new(draft, Utc::now().naive_utc()))
            .get_result::<DbEmployee>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?,
        };

        into_domain(db_employee)
    }

    /// Soft deletes the employee and drops their login, freeing the user name.
    fn delete(&self, id: EmployeeId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let credential_id = live_employees()
                .filter(employees::id.eq(id.get()))
                .select(employees::user_credential_id)
                .first::<Option<i32>>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            diesel::update(employees::table.find(id.get()))
                .set((
                    employees::deleted_at.eq(Some(Utc::now().naive_utc())),
                    employees::user_credential_id.eq(None::<i32>),
                ))
                .execute(conn)?;

            if let Some(credential_id) = credential_id {
                diesel::delete(user_credentials::table.find(credential_id)).execute(conn)?;
            }
            Ok(())
        })
    }
}

impl ContactReader<Employee> for DieselRepository {
    fn get_by_email(&self, email: &Email) -> RepositoryResult<Option<Employee>> {
        let mut conn = self.conn()?;
        live_employees()
            .filter(employees::email.eq(email.as_str().to_string()))
            .first::<DbEmployee>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn get_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<Employee>> {
        let mut conn = self.conn()?;
        live_employees()
            .filter(employees::phone_number.eq(phone.as_str().to_string()))
            .first::<DbEmployee>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }
}

impl EmployeeReader for DieselRepository {
    fn list_employees_by_manager(&self, manager_id: EmployeeId) -> RepositoryResult<Vec<Employee>> {
        let mut conn = self.conn()?;
        live_employees()
            .filter(employees::manager_id.eq(manager_id.get()))
            .order(employees::id.asc())
            .load::<DbEmployee>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    fn with_managers(&self, employees: Vec<Employee>) -> RepositoryResult<Vec<EmployeeDetails>> {
        let manager_ids: Vec<i32> = employees
            .iter()
            .filter_map(|employee| employee.manager_id.map(EmployeeId::get))
            .collect();

        let managers = if manager_ids.is_empty() {
            HashMap::new()
        } else {
            let mut conn = self.conn()?;
            live_employees_by_id(&mut conn, manager_ids)?
        };

        Ok(employees
            .into_iter()
            .map(|employee| EmployeeDetails {
                manager: employee
                    .manager_id
                    .and_then(|id| managers.get(&id).cloned()),
                employee,
            })
            .collect())
    }
}
