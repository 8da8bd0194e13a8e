//! Use cases shared by every entity: paged listing, lookup and deletion.

use serde::Serialize;

use crate::domain::Entity;
use crate::domain::types::{Email, PhoneNumber};
use crate::forms::query::ListQueryForm;
use crate::pagination::{Paging, RequestQueryParams};
use crate::repository::errors::{ConstraintKind, RepositoryError};
use crate::repository::{ContactReader, EntityReader, EntityWriter, ListQuery};
use crate::services::{ServiceError, ServiceResult};

/// One page of a list endpoint.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub paging: Paging,
}

impl<T> Page<T> {
    /// Replaces the items of the page, keeping its metadata.
    pub fn try_map_items<U, E>(
        self,
        f: impl FnOnce(Vec<T>) -> Result<Vec<U>, E>,
    ) -> Result<Page<U>, E> {
        Ok(Page {
            items: f(self.items)?,
            paging: self.paging,
        })
    }
}

/// Validates the raw query string and returns the requested page.
pub fn list_entities<T, R>(repo: &R, form: ListQueryForm) -> ServiceResult<Page<T>>
where
    T: Entity,
    R: EntityReader<T> + ?Sized,
{
    let params = RequestQueryParams::try_from(form)?;
    list_paged(repo, &params)
}

/// Checks the sort token, queries storage and computes the paging metadata.
///
/// An invalid sort fails before storage is touched.
pub fn list_paged<T, R>(repo: &R, params: &RequestQueryParams) -> ServiceResult<Page<T>>
where
    T: Entity,
    R: EntityReader<T> + ?Sized,
{
    let query = ListQuery::try_from(params)?;
    let (total_rows, items) = repo.list(&query)?;

    Ok(Page {
        items,
        paging: Paging::new(params.pagination.page, params.pagination.limit, total_rows),
    })
}

fn not_found<T: Entity>(id: impl std::fmt::Display) -> ServiceError {
    ServiceError::NotFound(format!("{} with ID {id} not found", T::NAME))
}

/// Parses a raw path identifier of `T`.
pub fn parse_id<T: Entity>(id: i32) -> ServiceResult<T::Id> {
    T::Id::try_from(id).map_err(|_| not_found::<T>(id))
}

pub fn find_by_id<T, R>(repo: &R, id: i32) -> ServiceResult<T>
where
    T: Entity,
    R: EntityReader<T> + ?Sized,
{
    let id = parse_id::<T>(id)?;
    ensure_exists(repo, id)
}

/// Loads the live row with `id`, failing with `NotFound` when absent.
pub fn ensure_exists<T, R>(repo: &R, id: T::Id) -> ServiceResult<T>
where
    T: Entity,
    R: EntityReader<T> + ?Sized,
{
    repo.get(id)?.ok_or_else(|| not_found::<T>(id))
}

/// Saves a draft of `T`, naming `T` when a constraint refuses the write.
pub fn save_draft<T, R>(repo: &R, draft: &T::Draft) -> ServiceResult<T>
where
    T: Entity,
    R: EntityWriter<T> + ?Sized,
{
    repo.save(draft).map_err(|err| match err {
        RepositoryError::ConstraintViolation {
            kind: kind @ (ConstraintKind::Unique | ConstraintKind::ForeignKey),
            detail,
        } => {
            log::warn!("Saving {} refused by {kind} constraint: {detail}", T::NAME);
            let message = match kind {
                ConstraintKind::ForeignKey => {
                    format!("{} references a record that does not exist", T::NAME)
                }
                _ => format!("{} conflicts with an existing record", T::NAME),
            };
            ServiceError::Conflict(message)
        }
        other => other.into(),
    })
}

pub fn delete_existing<T, R>(repo: &R, id: i32) -> ServiceResult<()>
where
    T: Entity,
    R: EntityReader<T> + EntityWriter<T> + ?Sized,
{
    let entity: T = find_by_id(repo, id)?;
    repo.delete(entity.id())?;
    Ok(())
}

/// Fails with `Conflict` when another `T` already uses the email or phone.
pub fn ensure_contact_free<T, R>(
    repo: &R,
    email: &Email,
    phone: &PhoneNumber,
    own_id: Option<T::Id>,
) -> ServiceResult<()>
where
    T: Entity,
    R: ContactReader<T> + ?Sized,
{
    let taken = |existing: Option<T>| existing.is_some_and(|other| Some(other.id()) != own_id);

    if taken(repo.get_by_email(email)?) {
        return Err(ServiceError::Conflict(format!(
            "{} with email {email} already exists",
            T::NAME
        )));
    }

    if taken(repo.get_by_phone(phone)?) {
        return Err(ServiceError::Conflict(format!(
            "{} with phone number {phone} already exists",
            T::NAME
        )));
    }

    Ok(())
}
