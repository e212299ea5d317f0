//! Core logic for the customer document store demo.
//! Record model, SQLite-backed document store, repository and demo runner.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_store, ConfigError, DbError, StoreUri, DEFAULT_STORE_URI};
pub use logging::{init_logging, logging_status};
pub use model::customer::{Customer, CustomerId};
pub use repo::customer_repo::{CustomerRepository, SqliteCustomerRepository};
pub use repo::document::{Document, DocumentCollection, RepoError, RepoResult};
pub use service::demo_runner::{
    DemoRunner, RunError, RunReport, RunResult, RunStage, LOOKUP_FIRST_NAME, LOOKUP_LAST_NAME,
    SEED_CUSTOMERS,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
