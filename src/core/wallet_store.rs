//! Wallet state management
//!
//! This module provides the `WalletStore` struct which maintains the state of
//! all wallets and their cached balances.
//!
//! The WalletStore is responsible for:
//! - Holding the wallets loaded as reference data
//! - Applying signed balance deltas with checked arithmetic
//! - Staging balance changes so multi-wallet edits commit atomically
//! - Providing sorted wallet listings for output

use crate::types::{LedgerError, Wallet, WalletId};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Manages all wallets and their cached balances
///
/// Unlike accounts in a payments system, wallets are not created on first
/// use: they are reference data loaded up front, and an operation that
/// references a wallet id not present here is refused outright.
pub struct WalletStore {
    /// Map of wallet IDs to wallet state
    wallets: HashMap<WalletId, Wallet>,
}

impl WalletStore {
    /// Create a store holding the given wallets
    ///
    /// The last wallet wins if two share an id; loaders reject duplicate ids
    /// before this point.
    pub fn new(wallets: Vec<Wallet>) -> Self {
        WalletStore {
            wallets: wallets.into_iter().map(|w| (w.id, w)).collect(),
        }
    }

    /// Look up a wallet by id
    pub fn get(&self, id: WalletId) -> Option<&Wallet> {
        self.wallets.get(&id)
    }

    /// Whether a wallet with this id exists
    pub fn contains(&self, id: WalletId) -> bool {
        self.wallets.contains_key(&id)
    }

    /// Get all wallets sorted by wallet ID
    ///
    /// Sorted output keeps report generation deterministic.
    pub fn all_sorted(&self) -> Vec<&Wallet> {
        let mut wallets: Vec<&Wallet> = self.wallets.values().collect();
        wallets.sort_by_key(|wallet| wallet.id);
        wallets
    }

    /// Compute the balance a wallet would have after applying `delta`
    ///
    /// Pure with respect to store state: nothing is mutated. Callers stage
    /// every new balance of a multi-wallet edit through this method first,
    /// then commit them with [`WalletStore::set_balance`], so a failure on
    /// any leg leaves all balances untouched.
    ///
    /// # Arguments
    ///
    /// * `id` - The wallet to compute for
    /// * `delta` - Signed balance change
    /// * `operation` - Operation name for error context
    ///
    /// # Errors
    ///
    /// * `UnknownWallet` - No wallet with this id exists
    /// * `ArithmeticOverflow` - The addition would overflow
    pub fn balance_after(
        &self,
        id: WalletId,
        delta: Decimal,
        operation: &str,
    ) -> Result<Decimal, LedgerError> {
        let wallet = self
            .wallets
            .get(&id)
            .ok_or_else(|| LedgerError::unknown_wallet(id, operation))?;

        wallet
            .balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, id))
    }

    /// Overwrite a wallet's balance with a staged value
    ///
    /// # Errors
    ///
    /// * `UnknownWallet` - No wallet with this id exists
    pub fn set_balance(&mut self, id: WalletId, balance: Decimal) -> Result<(), LedgerError> {
        let wallet = self
            .wallets
            .get_mut(&id)
            .ok_or_else(|| LedgerError::unknown_wallet(id, "set_balance"))?;
        wallet.balance = balance;
        Ok(())
    }

    /// Apply a signed delta to a single wallet's balance
    ///
    /// Convenience for single-wallet operations (create, delete): stages and
    /// commits in one call.
    ///
    /// # Errors
    ///
    /// * `UnknownWallet` - No wallet with this id exists
    /// * `ArithmeticOverflow` - The addition would overflow
    pub fn apply(
        &mut self,
        id: WalletId,
        delta: Decimal,
        operation: &str,
    ) -> Result<(), LedgerError> {
        let balance = self.balance_after(id, delta, operation)?;
        self.set_balance(id, balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WalletKind;

    fn wallet(id: WalletId, balance: i64) -> Wallet {
        Wallet {
            id,
            name: format!("Wallet {}", id),
            balance: Decimal::from(balance),
            kind: WalletKind::Cash,
        }
    }

    #[test]
    fn test_apply_adds_signed_delta() {
        let mut store = WalletStore::new(vec![wallet(1, 1_000_000)]);
        store.apply(1, Decimal::from(-300_000), "create").unwrap();
        assert_eq!(store.get(1).unwrap().balance, Decimal::from(700_000));
    }

    #[test]
    fn test_apply_unknown_wallet_fails() {
        let mut store = WalletStore::new(vec![wallet(1, 0)]);
        let result = store.apply(99, Decimal::from(100), "create");
        assert!(matches!(
            result.unwrap_err(),
            LedgerError::UnknownWallet { wallet: 99, .. }
        ));
    }

    #[test]
    fn test_balance_after_does_not_mutate() {
        let store = WalletStore::new(vec![wallet(1, 500)]);
        let staged = store.balance_after(1, Decimal::from(100), "update").unwrap();
        assert_eq!(staged, Decimal::from(600));
        assert_eq!(store.get(1).unwrap().balance, Decimal::from(500));
    }

    #[test]
    fn test_all_sorted_orders_by_id() {
        let store = WalletStore::new(vec![wallet(3, 0), wallet(1, 0), wallet(2, 0)]);
        let ids: Vec<WalletId> = store.all_sorted().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
