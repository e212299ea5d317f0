//! Customer record.
//!
//! # Responsibility
//! - Define the stored customer entity and its textual form for logs.
//!
//! # Invariants
//! - `id` is `None` until the store persists the record.
//! - Once assigned, `id` is never reused for another customer.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Store-assigned identifier of a customer.
pub type CustomerId = Uuid;

/// A customer with a first and last name.
///
/// Names are required but not validated or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Assigned on insert; absent for records that were never saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
}

impl Customer {
    /// Creates an unsaved customer.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Returns whether the store has assigned an id to this record.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Display for Customer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Customer[id={id}, ")?,
            None => write!(f, "Customer[id=none, ")?,
        }
        write!(
            f,
            "firstName='{}', lastName='{}']",
            self.first_name, self.last_name
        )
    }
}
