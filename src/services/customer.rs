//! Customer use cases.

use crate::auth::hash_password;
use crate::domain::customer::{Customer, CustomerDraft};
use crate::domain::types::{Email, PhoneNumber, UserName};
use crate::domain::user::CredentialDraft;
use crate::forms::customer::SaveCustomerForm;
use crate::forms::query::ListQueryForm;
use crate::repository::{ContactReader, EntityReader, EntityWriter};
use crate::services::ServiceResult;
use crate::services::entity::{
    Page, delete_existing, ensure_contact_free, ensure_exists, find_by_id, list_entities,
    save_draft,
};

pub fn list_customers<R>(repo: &R, form: ListQueryForm) -> ServiceResult<Page<Customer>>
where
    R: EntityReader<Customer> + ?Sized,
{
    list_entities(repo, form)
}

pub fn get_customer<R>(repo: &R, id: i32) -> ServiceResult<Customer>
where
    R: EntityReader<Customer> + ?Sized,
{
    find_by_id(repo, id)
}

/// Saves a customer. A new customer also gets an inactive login named after
/// their email, protected by `default_password`.
pub fn save_customer<R>(
    repo: &R,
    form: SaveCustomerForm,
    default_password: &str,
) -> ServiceResult<Customer>
where
    R: EntityReader<Customer> + EntityWriter<Customer> + ContactReader<Customer> + ?Sized,
{
    let mut draft = CustomerDraft::try_from(form)?;

    ensure_contact_free::<Customer, _>(repo, &draft.email, &draft.phone_number, draft.id)?;

    match draft.id {
        Some(id) => {
            ensure_exists::<Customer, _>(repo, id)?;
        }
        None => {
            draft.credential = Some(CredentialDraft::provisioned(
                UserName::new(draft.email.as_str())?,
                hash_password(default_password)?,
            ));
        }
    }

    save_draft::<Customer, _>(repo, &draft)
}

pub fn delete_customer<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: EntityReader<Customer> + EntityWriter<Customer> + ?Sized,
{
    delete_existing::<Customer, _>(repo, id)
}

pub fn find_customer_by_email<R>(repo: &R, email: &str) -> ServiceResult<Option<Customer>>
where
    R: ContactReader<Customer> + ?Sized,
{
    Ok(repo.get_by_email(&Email::new(email)?)?)
}

pub fn find_customer_by_phone<R>(repo: &R, phone: &str) -> ServiceResult<Option<Customer>>
where
    R: ContactReader<Customer> + ?Sized,
{
    Ok(repo.get_by_phone(&PhoneNumber::new(phone)?)?)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::auth::verify_password;
    use crate::domain::types::{CustomerId, PersonName};
    use crate::repository::mock::MockCustomerRepository;
    use crate::services::ServiceError;

    fn form(id: Option<i32>) -> SaveCustomerForm {
        SaveCustomerForm {
            id,
            first_name: "Rina".to_string(),
            last_name: "Putri".to_string(),
            address: "Jl. Merdeka 1".to_string(),
            phone_number: "+6281255556666".to_string(),
            email: "rina@example.com".to_string(),
            bod: NaiveDate::from_ymd_opt(1995, 7, 17).unwrap(),
        }
    }

    fn customer(id: i32, email: &str) -> Customer {
        let now = Utc::now().naive_utc();
        Customer {
            id: CustomerId::new(id).unwrap(),
            first_name: PersonName::new("Rina").unwrap(),
            last_name: "Putri".to_string(),
            address: String::new(),
            phone_number: PhoneNumber::new("+6281255556666").unwrap(),
            email: Email::new(email).unwrap(),
            bod: NaiveDate::from_ymd_opt(1995, 7, 17).unwrap(),
            user_credential_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn new_customer_gets_inactive_credential() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));
        repo.expect_get_by_phone().returning(|_| Ok(None));
        repo.expect_save()
            .withf(|draft| {
                draft.credential.as_ref().is_some_and(|credential| {
                    credential.user_name.as_str() == "rina@example.com"
                        && !credential.is_active
                        && verify_password("welcome", &credential.password).unwrap_or(false)
                })
            })
            .times(1)
            .returning(|draft| Ok(customer(1, draft.email.as_str())));

        assert!(save_customer(&repo, form(None), "welcome").is_ok());
    }

    #[test]
    fn email_of_other_customer_is_a_conflict() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_get_by_email()
            .returning(|email| Ok(Some(customer(2, email.as_str()))));
        repo.expect_save().never();

        assert!(matches!(
            save_customer(&repo, form(None), "welcome"),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn update_may_keep_own_contacts() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_get_by_email()
            .returning(|email| Ok(Some(customer(1, email.as_str()))));
        repo.expect_get_by_phone()
            .returning(|_| Ok(Some(customer(1, "rina@example.com"))));
        repo.expect_get()
            .returning(|_| Ok(Some(customer(1, "rina@example.com"))));
        repo.expect_save()
            .withf(|draft| draft.credential.is_none())
            .times(1)
            .returning(|draft| Ok(customer(1, draft.email.as_str())));

        assert!(save_customer(&repo, form(Some(1)), "welcome").is_ok());
    }

    #[test]
    fn lookup_by_email_normalizes_input() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_get_by_email()
            .withf(|email| email.as_str() == "rina@example.com")
            .returning(|email| Ok(Some(customer(1, email.as_str()))));

        let found = find_customer_by_email(&repo, " Rina@Example.com ").unwrap();
        assert_eq!(found.map(|c| c.id.get()), Some(1));
    }
}
