//! Customer repository contract and document-store implementation.
//!
//! # Responsibility
//! - Expose the customer queries used by the demo runner.
//! - Map customer fields onto document field names.
//!
//! # Invariants
//! - `find_by_first_name` returns the earliest inserted match when several
//!   customers share a first name.

use crate::model::customer::{Customer, CustomerId};
use crate::repo::document::{Document, DocumentCollection, RepoResult};
use rusqlite::Connection;

const FIRST_NAME_FIELD: &str = "firstName";
const LAST_NAME_FIELD: &str = "lastName";

impl Document for Customer {
    const COLLECTION: &'static str = "customer";

    fn id(&self) -> Option<CustomerId> {
        self.id
    }

    fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Repository interface for customer records.
pub trait CustomerRepository {
    /// Inserts `customer` and returns it with its assigned id.
    fn save(&self, customer: &Customer) -> RepoResult<Customer>;
    /// Removes all customers.
    fn delete_all(&self) -> RepoResult<()>;
    /// Lists all customers. Order is not part of the contract.
    fn find_all(&self) -> RepoResult<Vec<Customer>>;
    fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Exact match on first name, at most one result.
    fn find_by_first_name(&self, first_name: &str) -> RepoResult<Option<Customer>>;
    /// Exact match on last name, every result.
    fn find_by_last_name(&self, last_name: &str) -> RepoResult<Vec<Customer>>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite document-store backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    customers: DocumentCollection<'conn, Customer>,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Uses the default `customer` collection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            customers: DocumentCollection::new(conn),
        }
    }

    /// Uses a custom collection name.
    pub fn with_collection(conn: &'conn Connection, collection: &str) -> RepoResult<Self> {
        Ok(Self {
            customers: DocumentCollection::with_name(conn, collection)?,
        })
    }

    pub fn collection_name(&self) -> &str {
        self.customers.name()
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn save(&self, customer: &Customer) -> RepoResult<Customer> {
        self.customers.insert(customer)
    }

    fn delete_all(&self) -> RepoResult<()> {
        self.customers.delete_all()?;
        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<Customer>> {
        self.customers.find_all()
    }

    fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        self.customers.find_by_id(id)
    }

    fn find_by_first_name(&self, first_name: &str) -> RepoResult<Option<Customer>> {
        self.customers.find_one_by_field(FIRST_NAME_FIELD, first_name)
    }

    fn find_by_last_name(&self, last_name: &str) -> RepoResult<Vec<Customer>> {
        self.customers.find_many_by_field(LAST_NAME_FIELD, last_name)
    }

    fn count(&self) -> RepoResult<u64> {
        self.customers.count()
    }
}
