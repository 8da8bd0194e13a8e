//! Employee use cases.

use crate::auth::hash_password;
use crate::domain::employee::{Employee, EmployeeDetails, EmployeeDraft};
use crate::domain::types::{Email, PhoneNumber, UserName};
use crate::domain::user::CredentialDraft;
use crate::forms::employee::SaveEmployeeForm;
use crate::forms::query::ListQueryForm;
use crate::repository::{ContactReader, EmployeeReader, EntityReader, EntityWriter};
use crate::services::entity::{
    Page, delete_existing, ensure_contact_free, ensure_exists, find_by_id, list_entities,
    save_draft,
};
use crate::services::{ServiceError, ServiceResult};

pub fn list_employees<R>(repo: &R, form: ListQueryForm) -> ServiceResult<Page<EmployeeDetails>>
where
    R: EntityReader<Employee> + EmployeeReader + ?Sized,
{
    let page: Page<Employee> = list_entities(repo, form)?;
    Ok(page.try_map_items(|items| repo.with_managers(items))?)
}

pub fn get_employee<R>(repo: &R, id: i32) -> ServiceResult<EmployeeDetails>
where
    R: EntityReader<Employee> + EmployeeReader + ?Sized,
{
    let employee: Employee = find_by_id(repo, id)?;
    repo.with_managers(vec![employee])?
        .pop()
        .ok_or_else(|| ServiceError::NotFound(format!("employee with ID {id} not found")))
}

/// Saves an employee. The manager, when given, must be another live employee.
pub fn save_employee<R>(
    repo: &R,
    form: SaveEmployeeForm,
    default_password: &str,
) -> ServiceResult<Employee>
where
    R: EntityReader<Employee> + EntityWriter<Employee> + ContactReader<Employee> + ?Sized,
{
    let mut draft = EmployeeDraft::try_from(form)?;

    ensure_contact_free::<Employee, _>(repo, &draft.email, &draft.phone_number, draft.id)?;

    if let Some(manager_id) = draft.manager_id {
        if Some(manager_id) == draft.id {
            return Err(ServiceError::Validation(
                "an employee cannot be their own manager".to_string(),
            ));
        }
        if repo.get(manager_id)?.is_none() {
            return Err(ServiceError::Validation(format!(
                "manager with ID {manager_id} not found"
            )));
        }
    }

    match draft.id {
        Some(id) => {
            ensure_exists::<Employee, _>(repo, id)?;
        }
        None => {
            draft.credential = Some(CredentialDraft::provisioned(
                UserName::new(draft.email.as_str())?,
                hash_password(default_password)?,
            ));
        }
    }

    save_draft::<Employee, _>(repo, &draft)
}

pub fn delete_employee<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: EntityReader<Employee> + EntityWriter<Employee> + ?Sized,
{
    delete_existing::<Employee, _>(repo, id)
}

/// Lists the direct reports of a manager, each with the manager embedded.
pub fn list_by_manager<R>(repo: &R, manager_id: i32) -> ServiceResult<Vec<EmployeeDetails>>
where
    R: EntityReader<Employee> + EmployeeReader + ?Sized,
{
    let manager: Employee = find_by_id(repo, manager_id)?;
    let reports = repo.list_employees_by_manager(manager.id)?;
    Ok(reports
        .into_iter()
        .map(|employee| EmployeeDetails {
            employee,
            manager: Some(manager.clone()),
        })
        .collect())
}

pub fn find_employee_by_email<R>(repo: &R, email: &str) -> ServiceResult<Option<Employee>>
where
    R: ContactReader<Employee> + ?Sized,
{
    Ok(repo.get_by_email(&Email::new(email)?)?)
}

pub fn find_employee_by_phone<R>(repo: &R, phone: &str) -> ServiceResult<Option<Employee>>
where
    R: ContactReader<Employee> + ?Sized,
{
    Ok(repo.get_by_phone(&PhoneNumber::new(phone)?)?)
}
