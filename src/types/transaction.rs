//! Transaction-related types for the Ledger & Reward Engine
//!
//! This module defines transaction kinds, drafts, persisted transactions, and
//! the operation alphabet the ledger engine consumes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wallet identifier
pub type WalletId = u32;

/// Category identifier
pub type CategoryId = u32;

/// Cashback rule identifier
pub type RuleId = u32;

/// Transaction identifier
pub type TransactionId = u64;

/// Direction of a transaction relative to its wallet
///
/// Income credits the wallet balance, expense debits it. Every balance
/// mutation in the ledger goes through [`TransactionKind::signed_effect`]
/// so that create, update, and delete all agree on the sign convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Money leaving the wallet (balance decreases)
    Expense,

    /// Money entering the wallet (balance increases)
    Income,
}

impl TransactionKind {
    /// Net effect of a transaction of this kind on its wallet balance
    ///
    /// # Arguments
    ///
    /// * `amount` - The (positive) transaction amount
    ///
    /// # Returns
    ///
    /// `+amount` for income, `-amount` for expense
    pub fn signed_effect(self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Income => amount,
            TransactionKind::Expense => -amount,
        }
    }
}

/// User-submitted transaction data, before the reward is computed
///
/// A draft carries everything the user controls. The engine turns a draft
/// into a [`Transaction`] by computing `cashback_amount` (and the matched
/// rule id) exactly once at save time.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// Unique transaction identifier
    pub id: TransactionId,

    /// Wallet the transaction is attributed to
    pub wallet: WalletId,

    /// Spending/income category
    pub category: CategoryId,

    /// Expense or income
    pub kind: TransactionKind,

    /// Transaction amount (must be strictly positive)
    pub amount: Decimal,

    /// Calendar date of the transaction
    pub date: NaiveDate,

    /// Free-text note
    pub note: String,
}

/// Persisted transaction record
///
/// `cashback_amount` is computed by the reward engine when the transaction is
/// saved and is treated thereafter as an immutable fact: cap accounting and
/// reports read it back, they never re-derive it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: TransactionId,

    /// Wallet the transaction is attributed to
    pub wallet: WalletId,

    /// Spending/income category
    pub category: CategoryId,

    /// Expense or income
    pub kind: TransactionKind,

    /// Transaction amount (strictly positive)
    pub amount: Decimal,

    /// Calendar date of the transaction
    pub date: NaiveDate,

    /// Free-text note
    pub note: String,

    /// Cashback earned by this transaction, fixed at save time (>= 0)
    pub cashback_amount: Decimal,

    /// The cashback rule that produced `cashback_amount`
    ///
    /// Always persisted on new saves. May be absent on legacy records, in
    /// which case cap accounting falls back to category-based attribution.
    pub rule: Option<RuleId>,
}

impl Transaction {
    /// Net effect of this transaction on its wallet balance
    pub fn signed_effect(&self) -> Decimal {
        self.kind.signed_effect(self.amount)
    }
}

/// A single ledger operation
///
/// The engine's input alphabet: transactions are created, edited, or deleted.
/// Wallets and categories are reference data loaded up front and are not
/// mutated through operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Save a new transaction
    Create(TransactionDraft),

    /// Replace an existing transaction (matched by draft id) with new data
    ///
    /// The old balance effect is reversed and the new one applied as a single
    /// state transition, possibly touching two wallets.
    Update(TransactionDraft),

    /// Remove a transaction and reverse its balance effect
    Delete {
        /// Identifier of the transaction to remove
        id: TransactionId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_effect_income_is_positive() {
        assert_eq!(
            TransactionKind::Income.signed_effect(Decimal::from(500)),
            Decimal::from(500)
        );
    }

    #[test]
    fn test_signed_effect_expense_is_negative() {
        assert_eq!(
            TransactionKind::Expense.signed_effect(Decimal::from(500)),
            Decimal::from(-500)
        );
    }
}
