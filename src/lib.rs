//! Ledger & Reward Engine Library
//!
//! # Overview
//!
//! This library tracks money-holding wallets, categorized transactions, and,
//! for credit wallets, cashback accrual governed by per-wallet reward rules
//! with monthly billing cycles and caps.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Wallet, Category, CashbackRule, Transaction)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::cycle`] - Billing-cycle window calculation
//!   - [`core::rule_match`] - Cashback rule selection
//!   - [`core::cap`] - Per-cycle reward cap enforcement
//!   - [`core::reward`] - Reward estimation entry point
//!   - [`core::engine`] - Ledger operation orchestration
//! - [`io`] - CSV loading, the streaming operation-log reader, and reports
//! - [`pipeline`] - File-in, report-out orchestration for the CLI
//!
//! # Operations
//!
//! The engine supports three ledger operations:
//!
//! - **Create**: Save a new transaction, computing its cashback once
//! - **Update**: Replace a transaction, reversing the old balance effect and
//!   applying the new one as a single state transition
//! - **Delete**: Remove a transaction and reverse its balance effect
//!
//! # Ledger invariant
//!
//! After every operation, each wallet's balance equals its initial balance
//! plus the net signed effect of all transactions currently attributed to it.
//! Cashback never exceeds a rule's per-cycle cap across any sequence of
//! transactions inside one billing cycle.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use crate::core::{cycle_of, CycleWindow, LedgerEngine, RewardEstimate, RuleUsage};
pub use crate::io::{write_balances_csv, write_cashback_csv};
pub use crate::types::{
    CashbackRule, Category, CategoryId, CreditTerms, LedgerError, MatchKey, Operation, RuleId,
    Transaction, TransactionDraft, TransactionId, TransactionKind, Wallet, WalletId, WalletKind,
};
