//! Core business logic module
//!
//! This module contains the ledger and reward components:
//! - `cycle` - Billing-cycle window calculation
//! - `rule_match` - Cashback rule selection
//! - `cap` - Per-cycle reward cap enforcement
//! - `reward` - Reward estimation entry point
//! - `wallet_store` - Wallet state and balance mutations
//! - `transaction_store` - Stored transactions
//! - `engine` - Ledger operation orchestration

pub mod cap;
pub mod cycle;
pub mod engine;
pub mod reward;
pub mod rule_match;
pub mod transaction_store;
pub mod wallet_store;

pub use cycle::{cycle_of, CycleWindow};
pub use engine::{LedgerEngine, RuleUsage};
pub use reward::{estimate, RewardEstimate};
pub use rule_match::match_rule;
pub use transaction_store::TransactionStore;
pub use wallet_store::WalletStore;
