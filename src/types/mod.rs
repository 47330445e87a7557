//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `wallet`: Wallet and credit-card terms
//! - `category`: Transaction categories
//! - `rule`: Cashback rules and match keys
//! - `transaction`: Transactions, drafts, operations, and identifiers
//! - `error`: Error types for the ledger engine

pub mod category;
pub mod error;
pub mod rule;
pub mod transaction;
pub mod wallet;

pub use category::Category;
pub use error::LedgerError;
pub use rule::{CashbackRule, MatchKey};
pub use transaction::{
    CategoryId, Operation, RuleId, Transaction, TransactionDraft, TransactionId, TransactionKind,
    WalletId,
};
pub use wallet::{CreditTerms, Wallet, WalletKind, DEFAULT_CYCLE_START_DAY};
