//! Transaction storage
//!
//! This module provides the TransactionStore component that maintains every
//! saved transaction. The store backs three consumers: edits and deletes look
//! transactions up by id, cap accounting iterates transactions of a wallet
//! inside a billing cycle, and the ledger invariant is defined over the full
//! set of stored records.

use crate::types::{LedgerError, Transaction, TransactionId};
use std::collections::HashMap;

/// Store of all saved transactions, keyed by transaction id
pub struct TransactionStore {
    /// Map of transaction ID to transaction
    transactions: HashMap<TransactionId, Transaction>,
}

impl TransactionStore {
    /// Create a new empty transaction store
    pub fn new() -> Self {
        TransactionStore {
            transactions: HashMap::new(),
        }
    }

    /// Whether a transaction with this id exists
    pub fn contains(&self, id: TransactionId) -> bool {
        self.transactions.contains_key(&id)
    }

    /// Get an immutable reference to a stored transaction
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(&id)
    }

    /// Insert a newly created transaction
    ///
    /// The caller checks for duplicates first (a duplicate create is an
    /// error, not a silent overwrite); an existing entry is replaced here
    /// only through [`TransactionStore::replace`].
    pub fn insert(&mut self, tx: Transaction) {
        self.transactions.insert(tx.id, tx);
    }

    /// Replace an existing transaction with its edited version
    ///
    /// # Errors
    ///
    /// * `TransactionNotFound` - No transaction with this id exists
    pub fn replace(&mut self, tx: Transaction) -> Result<(), LedgerError> {
        match self.transactions.get_mut(&tx.id) {
            Some(slot) => {
                *slot = tx;
                Ok(())
            }
            None => Err(LedgerError::transaction_not_found(tx.id, "replace")),
        }
    }

    /// Remove a transaction, returning it
    ///
    /// # Errors
    ///
    /// * `TransactionNotFound` - No transaction with this id exists
    pub fn remove(&mut self, id: TransactionId) -> Result<Transaction, LedgerError> {
        self.transactions
            .remove(&id)
            .ok_or_else(|| LedgerError::transaction_not_found(id, "delete"))
    }

    /// Iterate over all stored transactions (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    /// Number of stored transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}
