//! Mock repository implementations for isolating services in tests.
//!
//! Each entity gets its own mock, since a single mock cannot implement the
//! generic reader and writer contracts for several entities at once.

use std::path::{Path, PathBuf};

use mockall::mock;

use crate::domain::brand::{Brand, BrandDraft};
use crate::domain::customer::{Customer, CustomerDraft};
use crate::domain::employee::{Employee, EmployeeDetails, EmployeeDraft};
use crate::domain::transaction::{NewTransaction, Transaction, TransactionDetails};
use crate::domain::types::{
    BrandId, BrandName, CustomerId, Email, EmployeeId, PhoneNumber, TransactionId,
    UserCredentialId, UserName, VehicleId,
};
use crate::domain::user::{CredentialDraft, UserCredential};
use crate::domain::vehicle::{Vehicle, VehicleDraft};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BrandReader, ContactReader, CredentialReader, CredentialWriter, EmployeeReader, EntityReader,
    EntityWriter, FileStore, ListQuery, TransactionReader, TransactionWriter,
};

mock! {
    pub BrandRepository {}

    impl EntityReader<Brand> for BrandRepository {
        fn get(&self, id: BrandId) -> RepositoryResult<Option<Brand>>;
        fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Brand>)>;
    }

    impl EntityWriter<Brand> for BrandRepository {
        fn save(&self, draft: &BrandDraft) -> RepositoryResult<Brand>;
        fn delete(&self, id: BrandId) -> RepositoryResult<()>;
    }

    impl BrandReader for BrandRepository {
        fn get_brand_by_name(&self, name: &BrandName) -> RepositoryResult<Option<Brand>>;
    }
}

mock! {
    pub VehicleRepository {}

    impl EntityReader<Vehicle> for VehicleRepository {
        fn get(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;
        fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)>;
    }

    impl EntityWriter<Vehicle> for VehicleRepository {
        fn save(&self, draft: &VehicleDraft) -> RepositoryResult<Vehicle>;
        fn delete(&self, id: VehicleId) -> RepositoryResult<()>;
    }
}

mock! {
    pub CustomerRepository {}

    impl EntityReader<Customer> for CustomerRepository {
        fn get(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
        fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }

    impl EntityWriter<Customer> for CustomerRepository {
        fn save(&self, draft: &CustomerDraft) -> RepositoryResult<Customer>;
        fn delete(&self, id: CustomerId) -> RepositoryResult<()>;
    }

    impl ContactReader<Customer> for CustomerRepository {
        fn get_by_email(&self, email: &Email) -> RepositoryResult<Option<Customer>>;
        fn get_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<Customer>>;
    }
}

mock! {
    pub EmployeeRepository {}

    impl EntityReader<Employee> for EmployeeRepository {
        fn get(&self, id: EmployeeId) -> RepositoryResult<Option<Employee>>;
        fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Employee>)>;
    }

    impl EntityWriter<Employee> for EmployeeRepository {
        fn save(&self, draft: &EmployeeDraft) -> RepositoryResult<Employee>;
        fn delete(&self, id: EmployeeId) -> RepositoryResult<()>;
    }

    impl ContactReader<Employee> for EmployeeRepository {
        fn get_by_email(&self, email: &Email) -> RepositoryResult<Option<Employee>>;
        fn get_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<Option<Employee>>;
    }

    impl EmployeeReader for EmployeeRepository {
        fn list_employees_by_manager(&self, manager_id: EmployeeId) -> RepositoryResult<Vec<Employee>>;
        fn with_managers(&self, employees: Vec<Employee>) -> RepositoryResult<Vec<EmployeeDetails>>;
    }
}

mock! {
    pub TransactionRepository {}

    impl EntityReader<Transaction> for TransactionRepository {
        fn get(&self, id: TransactionId) -> RepositoryResult<Option<Transaction>>;
        fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Transaction>)>;
    }

    impl TransactionReader for TransactionRepository {
        fn with_parties(
            &self,
            transactions: Vec<Transaction>,
        ) -> RepositoryResult<Vec<TransactionDetails>>;
    }

    impl TransactionWriter for TransactionRepository {
        fn register_transaction(
            &self,
            new_transaction: &NewTransaction,
        ) -> RepositoryResult<Transaction>;
    }
}

mock! {
    pub CredentialRepository {}

    impl CredentialReader for CredentialRepository {
        fn get_credential_by_id(
            &self,
            id: UserCredentialId,
        ) -> RepositoryResult<Option<UserCredential>>;
        fn get_credential_by_user_name(
            &self,
            user_name: &UserName,
        ) -> RepositoryResult<Option<UserCredential>>;
    }

    impl CredentialWriter for CredentialRepository {
        fn save_credential(&self, draft: &CredentialDraft) -> RepositoryResult<UserCredential>;
        fn set_credential_active(
            &self,
            id: UserCredentialId,
            is_active: bool,
        ) -> RepositoryResult<UserCredential>;
    }
}

mock! {
    pub FileStorage {}

    impl FileStore for FileStorage {
        fn store(&self, source: &Path, extension: &str) -> RepositoryResult<String>;
        fn path_of(&self, file_name: &str) -> PathBuf;
        fn remove(&self, file_name: &str) -> RepositoryResult<()>;
    }
}
