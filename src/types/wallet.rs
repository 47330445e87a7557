//! Wallet types
//!
//! A wallet is an account holding a balance. Credit wallets additionally carry
//! a credit limit, statement/cycle anchor days, and an ordered list of
//! cashback rules. Those credit-only attributes live on the [`WalletKind`]
//! variant rather than as optional fields, so reward-engine code is written
//! only against [`CreditTerms`] and cannot be invoked for cash or debit
//! wallets by construction.

use super::rule::CashbackRule;
use super::transaction::WalletId;
use rust_decimal::Decimal;

/// Default billing-cycle anchor when a credit wallet does not configure one
pub const DEFAULT_CYCLE_START_DAY: u32 = 1;

/// Credit-card terms attached to a credit wallet
#[derive(Debug, Clone, PartialEq)]
pub struct CreditTerms {
    /// Credit limit of the card
    pub credit_limit: Decimal,

    /// Day of month (1-31) the statement closes
    pub statement_day: u32,

    /// Day of month (1-31) the cashback cycle starts
    ///
    /// Days beyond a month's length clamp to that month's last day when a
    /// concrete cycle window is computed.
    pub cycle_start_day: u32,

    /// Ordered cashback rules; order breaks ties between rules sharing a key
    pub rules: Vec<CashbackRule>,
}

/// Wallet classification
#[derive(Debug, Clone, PartialEq)]
pub enum WalletKind {
    /// Physical cash
    Cash,

    /// Debit card / bank account
    Debit,

    /// Credit card, with cashback terms
    Credit(CreditTerms),
}

impl WalletKind {
    /// Short lowercase label used in CSV output
    pub fn label(&self) -> &'static str {
        match self {
            WalletKind::Cash => "cash",
            WalletKind::Debit => "debit",
            WalletKind::Credit(_) => "credit",
        }
    }
}

/// An account holding a balance
///
/// The balance is a cached value maintained by the ledger engine: after every
/// operation it equals the wallet's initial balance plus the net signed effect
/// of all transactions currently attributed to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    /// Unique wallet identifier
    pub id: WalletId,

    /// Display name
    pub name: String,

    /// Current balance (signed; credit wallets typically run negative)
    pub balance: Decimal,

    /// Cash, debit, or credit (with terms)
    pub kind: WalletKind,
}

impl Wallet {
    /// Credit terms, if this is a credit wallet
    pub fn credit_terms(&self) -> Option<&CreditTerms> {
        match &self.kind {
            WalletKind::Credit(terms) => Some(terms),
            _ => None,
        }
    }
}
