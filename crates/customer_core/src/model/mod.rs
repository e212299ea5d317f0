//! Domain records stored by the customer demo.
//!
//! # Responsibility
//! - Define plain data records independent of storage details.
//!
//! # Invariants
//! - A record carries an identifier only after the store assigned one.

pub mod customer;
