//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define record-oriented data access contracts.
//! - Isolate SQLite/JSON details from the runner.
//!
//! # Invariants
//! - Inserts always assign a fresh store id.
//! - "No match" on a single-result lookup is `Ok(None)`, never an error.

pub mod customer_repo;
pub mod document;
