//! Error types for the Ledger & Reward Engine
//!
//! This module defines all error conditions the engine can report. Errors are
//! descriptive and user-facing: the CLI prints them verbatim to stderr.
//!
//! # Error Categories
//!
//! - **File I/O errors**: file not found, permission denied, etc.
//! - **CSV parsing errors**: malformed rows, invalid field values
//! - **Reference errors**: transactions pointing at unknown wallets/categories
//! - **Ledger errors**: invalid amounts, duplicate or missing transactions
//! - **Configuration errors**: out-of-range rule or cycle parameters
//!
//! "No applicable cashback rule" is deliberately not an error: it is the
//! normal reward-zero outcome and never surfaces here.

use super::transaction::{CategoryId, RuleId, TransactionId, WalletId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger engine
///
/// Each variant carries enough context to diagnose the failing record. A
/// returned error guarantees no partial state change: validation happens
/// before any balance is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// File not found at the specified path
    ///
    /// Fatal: prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error
    ///
    /// Recoverable for the operation log (the row is skipped); fatal for
    /// reference data, which must load completely.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Transaction amount is zero or negative
    ///
    /// Rejected before any reward or balance computation runs.
    #[error("Invalid amount {amount} for transaction {tx}: amounts must be positive")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
        /// Transaction ID
        tx: TransactionId,
    },

    /// Operation references a wallet id not present in current state
    ///
    /// The dangling-reference condition: the operation is refused and no
    /// balance is mutated.
    #[error("Unknown wallet {wallet} referenced by {operation}")]
    UnknownWallet {
        /// The wallet id that did not resolve
        wallet: WalletId,
        /// Operation that was refused
        operation: String,
    },

    /// Operation references a category id not present in current state
    #[error("Unknown category {category} referenced by transaction {tx}")]
    UnknownCategory {
        /// The category id that did not resolve
        category: CategoryId,
        /// Transaction ID
        tx: TransactionId,
    },

    /// Update/delete targets a transaction that does not exist
    #[error("Transaction {tx} not found for {operation}")]
    TransactionNotFound {
        /// Transaction ID that was not found
        tx: TransactionId,
        /// Operation that failed
        operation: String,
    },

    /// Create reuses an existing transaction id
    #[error("Duplicate transaction ID {tx}")]
    DuplicateTransaction {
        /// Transaction ID that is duplicated
        tx: TransactionId,
    },

    /// Balance arithmetic would overflow
    #[error("Arithmetic overflow in {operation} for wallet {wallet}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Wallet ID
        wallet: WalletId,
    },

    /// Statement or cycle day outside 1-31
    #[error("Invalid {field} {value} for wallet {wallet}: must be between 1 and 31")]
    InvalidDayOfMonth {
        /// Which field was out of range
        field: String,
        /// The rejected value
        value: u32,
        /// Wallet ID
        wallet: WalletId,
    },

    /// Cashback percentage outside 0-100
    #[error("Invalid percentage {value} for rule {rule}: must be between 0 and 100")]
    InvalidPercentage {
        /// The rejected percentage
        value: Decimal,
        /// Rule ID
        rule: RuleId,
    },

    /// Negative minimum spend or reward cap on a rule
    #[error("Negative {field} for rule {rule}")]
    NegativeRuleAmount {
        /// Which field was negative
        field: String,
        /// Rule ID
        rule: RuleId,
    },

    /// A cashback rule was attached to a cash or debit wallet
    #[error("Rule {rule} targets wallet {wallet}, which is not a credit wallet")]
    RuleOnNonCreditWallet {
        /// Rule ID
        rule: RuleId,
        /// Wallet ID
        wallet: WalletId,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal, tx: TransactionId) -> Self {
        LedgerError::InvalidAmount { amount, tx }
    }

    /// Create an UnknownWallet error
    pub fn unknown_wallet(wallet: WalletId, operation: &str) -> Self {
        LedgerError::UnknownWallet {
            wallet,
            operation: operation.to_string(),
        }
    }

    /// Create an UnknownCategory error
    pub fn unknown_category(category: CategoryId, tx: TransactionId) -> Self {
        LedgerError::UnknownCategory { category, tx }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(tx: TransactionId, operation: &str) -> Self {
        LedgerError::TransactionNotFound {
            tx,
            operation: operation.to_string(),
        }
    }

    /// Create a DuplicateTransaction error
    pub fn duplicate_transaction(tx: TransactionId) -> Self {
        LedgerError::DuplicateTransaction { tx }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, wallet: WalletId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            wallet,
        }
    }

    /// Create an InvalidDayOfMonth error
    pub fn invalid_day_of_month(field: &str, value: u32, wallet: WalletId) -> Self {
        LedgerError::InvalidDayOfMonth {
            field: field.to_string(),
            value,
            wallet,
        }
    }

    /// Create an InvalidPercentage error
    pub fn invalid_percentage(value: Decimal, rule: RuleId) -> Self {
        LedgerError::InvalidPercentage { value, rule }
    }

    /// Create a NegativeRuleAmount error
    pub fn negative_rule_amount(field: &str, rule: RuleId) -> Self {
        LedgerError::NegativeRuleAmount {
            field: field.to_string(),
            rule,
        }
    }

    /// Create a RuleOnNonCreditWallet error
    pub fn rule_on_non_credit_wallet(rule: RuleId, wallet: WalletId) -> Self {
        LedgerError::RuleOnNonCreditWallet { rule, wallet }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::file_not_found(
        LedgerError::FileNotFound { path: "wallets.csv".to_string() },
        "File not found: wallets.csv"
    )]
    #[case::io_error(
        LedgerError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(7), message: "Invalid field".to_string() },
        "CSV parse error at line 7: Invalid field"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::invalid_amount(
        LedgerError::InvalidAmount { amount: Decimal::from(-100), tx: 9 },
        "Invalid amount -100 for transaction 9: amounts must be positive"
    )]
    #[case::unknown_wallet(
        LedgerError::UnknownWallet { wallet: 3, operation: "create".to_string() },
        "Unknown wallet 3 referenced by create"
    )]
    #[case::unknown_category(
        LedgerError::UnknownCategory { category: 12, tx: 4 },
        "Unknown category 12 referenced by transaction 4"
    )]
    #[case::transaction_not_found(
        LedgerError::TransactionNotFound { tx: 999, operation: "update".to_string() },
        "Transaction 999 not found for update"
    )]
    #[case::duplicate_transaction(
        LedgerError::DuplicateTransaction { tx: 5 },
        "Duplicate transaction ID 5"
    )]
    #[case::invalid_day(
        LedgerError::InvalidDayOfMonth { field: "cycle_start_day".to_string(), value: 32, wallet: 2 },
        "Invalid cycle_start_day 32 for wallet 2: must be between 1 and 31"
    )]
    #[case::invalid_percentage(
        LedgerError::InvalidPercentage { value: Decimal::from(150), rule: 1 },
        "Invalid percentage 150 for rule 1: must be between 0 and 100"
    )]
    #[case::rule_on_non_credit(
        LedgerError::RuleOnNonCreditWallet { rule: 1, wallet: 7 },
        "Rule 1 targets wallet 7, which is not a credit wallet"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_amount(
        LedgerError::invalid_amount(Decimal::ZERO, 1),
        LedgerError::InvalidAmount { amount: Decimal::ZERO, tx: 1 }
    )]
    #[case::unknown_wallet(
        LedgerError::unknown_wallet(3, "delete"),
        LedgerError::UnknownWallet { wallet: 3, operation: "delete".to_string() }
    )]
    #[case::transaction_not_found(
        LedgerError::transaction_not_found(999, "update"),
        LedgerError::TransactionNotFound { tx: 999, operation: "update".to_string() }
    )]
    #[case::arithmetic_overflow(
        LedgerError::arithmetic_overflow("apply", 2),
        LedgerError::ArithmeticOverflow { operation: "apply".to_string(), wallet: 2 }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
