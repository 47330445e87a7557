//! Category types
//!
//! Categories classify transactions (groceries, salary, ...) and are the keys
//! cashback rules match against. They are reference data: created and edited
//! by the user, immutable inputs to the engine.

use super::transaction::{CategoryId, TransactionKind};

/// A transaction category
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// Unique category identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Whether this category classifies expenses or income
    pub kind: TransactionKind,

    /// Optional default merchant category code
    pub mcc: Option<String>,
}
