//! Sales registration and history.

use crate::domain::transaction::{NewTransaction, Transaction, TransactionDetails};
use crate::forms::query::ListQueryForm;
use crate::forms::transaction::RegisterTransactionForm;
use crate::repository::errors::RepositoryError;
use crate::repository::{EntityReader, TransactionReader, TransactionWriter};
use crate::services::entity::{Page, find_by_id, list_entities};
use crate::services::{ServiceError, ServiceResult};

pub fn list_transactions<R>(
    repo: &R,
    form: ListQueryForm,
) -> ServiceResult<Page<TransactionDetails>>
where
    R: EntityReader<Transaction> + TransactionReader + ?Sized,
{
    let page: Page<Transaction> = list_entities(repo, form)?;
    Ok(page.try_map_items(|items| repo.with_parties(items))?)
}

pub fn get_transaction<R>(repo: &R, id: i32) -> ServiceResult<TransactionDetails>
where
    R: EntityReader<Transaction> + TransactionReader + ?Sized,
{
    let transaction: Transaction = find_by_id(repo, id)?;
    repo.with_parties(vec![transaction])?
        .pop()
        .ok_or_else(|| ServiceError::NotFound(format!("transaction with ID {id} not found")))
}

/// Registers a sale and takes the sold units out of stock.
pub fn register_transaction<R>(
    repo: &R,
    form: RegisterTransactionForm,
) -> ServiceResult<Transaction>
where
    R: TransactionWriter + ?Sized,
{
    let new_transaction = NewTransaction::try_from(form)?;

    repo.register_transaction(&new_transaction)
        .map_err(|err| match err {
            RepositoryError::NotFound => ServiceError::NotFound(
                "vehicle, customer or employee not found".to_string(),
            ),
            other => other.into(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::transaction::TransactionType;
    use crate::domain::types::{Amount, TransactionId};
    use crate::repository::mock::MockTransactionRepository;

    fn form(qty: i32) -> RegisterTransactionForm {
        RegisterTransactionForm {
            transaction_date: None,
            vehicle_id: 1,
            customer_id: 1,
            employee_id: 1,
            transaction_type: "offline".to_string(),
            payment_amount: None,
            qty,
        }
    }

    fn saved(new_transaction: &NewTransaction) -> Transaction {
        let now = Utc::now().naive_utc();
        Transaction {
            id: TransactionId::new(1).unwrap(),
            transaction_date: new_transaction.transaction_date,
            vehicle_id: new_transaction.vehicle_id,
            customer_id: new_transaction.customer_id,
            employee_id: new_transaction.employee_id,
            transaction_type: new_transaction.transaction_type,
            payment_amount: Amount::new(300_000_000).unwrap(),
            qty: new_transaction.qty,
            created_at: now,
            updated_at: now,
        }
    }

    fn without_parties(items: Vec<Transaction>) -> Vec<TransactionDetails> {
        items
            .into_iter()
            .map(|transaction| TransactionDetails {
                transaction,
                vehicle: None,
                customer: None,
                employee: None,
            })
            .collect()
    }

    #[test]
    fn listed_sales_embed_their_parties() {
        let mut repo = MockTransactionRepository::new();
        repo.expect_list().times(1).returning(|_| {
            let new_transaction = NewTransaction::try_from(form(1)).unwrap();
            Ok((6, vec![saved(&new_transaction)]))
        });
        repo.expect_with_parties()
            .withf(|items| items.len() == 1)
            .times(1)
            .returning(|items| Ok(without_parties(items)));

        let page = list_transactions(&repo, ListQueryForm::default()).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.paging.total_rows, 6);
        assert_eq!(page.paging.total_pages, 2);
    }

    #[test]
    fn invalid_sort_loads_nothing() {
        let mut repo = MockTransactionRepository::new();
        repo.expect_list().never();
        repo.expect_with_parties().never();

        let form = ListQueryForm {
            sort: Some("sideways".to_string()),
            ..ListQueryForm::default()
        };
        assert!(matches!(
            list_transactions(&repo, form),
            Err(ServiceError::InvalidSort(_))
        ));
    }

    #[test]
    fn single_sale_is_returned_with_parties() {
        let mut repo = MockTransactionRepository::new();
        repo.expect_get().returning(|_| {
            let new_transaction = NewTransaction::try_from(form(1)).unwrap();
            Ok(Some(saved(&new_transaction)))
        });
        repo.expect_with_parties()
            .times(1)
            .returning(|items| Ok(without_parties(items)));

        let details = get_transaction(&repo, 1).unwrap();
        assert_eq!(details.transaction.id.get(), 1);
        assert!(details.vehicle.is_none());
    }

    #[test]
    fn sale_is_registered() {
        let mut repo = MockTransactionRepository::new();
        repo.expect_register_transaction()
            .withf(|t| t.qty == 2 && t.transaction_type == TransactionType::Offline)
            .times(1)
            .returning(|t| Ok(saved(t)));

        let transaction = register_transaction(&repo, form(2)).unwrap();
        assert_eq!(transaction.payment_amount.get(), 300_000_000);
    }

    #[test]
    fn zero_quantity_never_reaches_storage() {
        let mut repo = MockTransactionRepository::new();
        repo.expect_register_transaction().never();

        assert!(matches!(
            register_transaction(&repo, form(0)),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn missing_reference_is_not_found() {
        let mut repo = MockTransactionRepository::new();
        repo.expect_register_transaction()
            .returning(|_| Err(RepositoryError::NotFound));

        let err = register_transaction(&repo, form(1)).unwrap_err();
        assert_eq!(err.to_string(), "vehicle, customer or employee not found");
    }

    #[test]
    fn short_stock_is_a_validation_error() {
        let mut repo = MockTransactionRepository::new();
        repo.expect_register_transaction().returning(|_| {
            Err(RepositoryError::ValidationError(
                "insufficient stock".to_string(),
            ))
        });

        assert!(matches!(
            register_transaction(&repo, form(9)),
            Err(ServiceError::Validation(_))
        ));
    }
}
