//! Ledger engine
//!
//! This module provides the LedgerEngine that orchestrates ledger operations
//! by coordinating between the WalletStore and TransactionStore components
//! and the reward estimator.
//!
//! The engine enforces the ledger invariant: after every operation, each
//! wallet's balance equals its initial balance plus the net signed effect of
//! all transactions currently attributed to it. Edits are a single state
//! transition: every new balance is staged before any is published, so a
//! failing operation leaves the ledger exactly as it was.

use crate::core::cap::cycle_total;
use crate::core::cycle::{cycle_of, CycleWindow};
use crate::core::reward::{estimate, RewardEstimate};
use crate::core::transaction_store::TransactionStore;
use crate::core::wallet_store::WalletStore;
use crate::types::{
    Category, CategoryId, LedgerError, MatchKey, Operation, RuleId, Transaction, TransactionDraft,
    TransactionId, Wallet, WalletId, WalletKind,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Per-rule cashback usage inside one billing cycle
///
/// Reported per credit wallet so the surrounding application can show how
/// much of each rule's cap is left.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleUsage {
    /// Wallet the rule belongs to
    pub wallet: WalletId,

    /// Rule identifier
    pub rule: RuleId,

    /// What the rule matches
    pub match_key: MatchKey,

    /// The billing cycle the aggregate covers
    pub window: CycleWindow,

    /// Cashback attributed to the rule inside the cycle
    pub earned: Decimal,

    /// The rule's cap (0 = unlimited)
    pub cap: Decimal,

    /// Cap headroom left in the cycle; `None` for uncapped rules
    pub remaining: Option<Decimal>,
}

/// Ledger processing engine
///
/// Orchestrates transaction create/update/delete by coordinating between
/// WalletStore and TransactionStore. Wallets and categories are immutable
/// reference data; only transactions (and the cached balances they drive)
/// change through operations.
pub struct LedgerEngine {
    wallets: WalletStore,
    categories: HashMap<CategoryId, Category>,
    transactions: TransactionStore,
}

impl LedgerEngine {
    /// Create a new LedgerEngine over the given reference data
    ///
    /// Validates credit terms up front so the pure core functions can assume
    /// well-formed rules: statement and cycle days must be 1-31, percentages
    /// 0-100, minimum spends and caps non-negative.
    ///
    /// # Errors
    ///
    /// * `InvalidDayOfMonth` - statement or cycle day outside 1-31
    /// * `InvalidPercentage` - rule percentage outside 0-100
    /// * `NegativeRuleAmount` - negative minimum spend or cap
    pub fn new(wallets: Vec<Wallet>, categories: Vec<Category>) -> Result<Self, LedgerError> {
        for wallet in &wallets {
            if let WalletKind::Credit(terms) = &wallet.kind {
                if !(1..=31).contains(&terms.statement_day) {
                    return Err(LedgerError::invalid_day_of_month(
                        "statement_day",
                        terms.statement_day,
                        wallet.id,
                    ));
                }
                if !(1..=31).contains(&terms.cycle_start_day) {
                    return Err(LedgerError::invalid_day_of_month(
                        "cycle_start_day",
                        terms.cycle_start_day,
                        wallet.id,
                    ));
                }
                for rule in &terms.rules {
                    if rule.percentage < Decimal::ZERO || rule.percentage > Decimal::from(100) {
                        return Err(LedgerError::invalid_percentage(rule.percentage, rule.id));
                    }
                    if rule.min_spend < Decimal::ZERO {
                        return Err(LedgerError::negative_rule_amount("min_spend", rule.id));
                    }
                    if rule.max_reward_per_period < Decimal::ZERO {
                        return Err(LedgerError::negative_rule_amount(
                            "max_reward_per_period",
                            rule.id,
                        ));
                    }
                }
            }
        }

        Ok(LedgerEngine {
            wallets: WalletStore::new(wallets),
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            transactions: TransactionStore::new(),
        })
    }

    /// Process a single ledger operation
    ///
    /// Routes the operation to the appropriate handler. A returned error
    /// guarantees no state was mutated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero or negative
    /// - A referenced wallet or category does not exist
    /// - A created transaction reuses an existing id
    /// - An updated or deleted transaction does not exist
    pub fn process(&mut self, operation: Operation) -> Result<(), LedgerError> {
        match operation {
            Operation::Create(draft) => self.create(draft),
            Operation::Update(draft) => self.update(draft),
            Operation::Delete { id } => self.delete(id),
        }
    }

    /// Save a new transaction
    ///
    /// Computes the reward exactly once, applies the signed balance effect to
    /// the owning wallet, and stores the transaction with its finalized
    /// `cashback_amount` and matched rule id.
    fn create(&mut self, draft: TransactionDraft) -> Result<(), LedgerError> {
        self.validate_draft(&draft, "create")?;

        if self.transactions.contains(draft.id) {
            return Err(LedgerError::duplicate_transaction(draft.id));
        }

        let reward = self.estimate_internal(&draft, None);

        let effect = draft.kind.signed_effect(draft.amount);
        self.wallets.apply(draft.wallet, effect, "create")?;
        self.transactions.insert(finalize(draft, reward));

        Ok(())
    }

    /// Replace an existing transaction with edited data
    ///
    /// Reverses the old balance effect and applies the new one as one state
    /// transition; when the transaction moves between wallets both are
    /// touched. The reward is recomputed with the transaction itself excluded
    /// from cap accounting, so editing an amount frees (or consumes) exactly
    /// its own share of the cycle cap.
    fn update(&mut self, draft: TransactionDraft) -> Result<(), LedgerError> {
        let old = self
            .transactions
            .get(draft.id)
            .cloned()
            .ok_or_else(|| LedgerError::transaction_not_found(draft.id, "update"))?;

        self.validate_draft(&draft, "update")?;
        // The old wallet may differ from the draft's; it must still resolve.
        if !self.wallets.contains(old.wallet) {
            return Err(LedgerError::unknown_wallet(old.wallet, "update"));
        }

        let reward = self.estimate_internal(&draft, Some(draft.id));

        let reverse = -old.signed_effect();
        let effect = draft.kind.signed_effect(draft.amount);

        // Stage every new balance before publishing any of them, so a
        // failure on either leg leaves both wallets untouched.
        if old.wallet == draft.wallet {
            let delta = reverse
                .checked_add(effect)
                .ok_or_else(|| LedgerError::arithmetic_overflow("update", draft.wallet))?;
            let balance = self.wallets.balance_after(draft.wallet, delta, "update")?;
            self.wallets.set_balance(draft.wallet, balance)?;
        } else {
            let old_balance = self.wallets.balance_after(old.wallet, reverse, "update")?;
            let new_balance = self.wallets.balance_after(draft.wallet, effect, "update")?;
            self.wallets.set_balance(old.wallet, old_balance)?;
            self.wallets.set_balance(draft.wallet, new_balance)?;
        }

        self.transactions.replace(finalize(draft, reward))?;

        Ok(())
    }

    /// Remove a transaction and reverse its balance effect
    fn delete(&mut self, id: TransactionId) -> Result<(), LedgerError> {
        let tx = self
            .transactions
            .get(id)
            .ok_or_else(|| LedgerError::transaction_not_found(id, "delete"))?;

        let reverse = -tx.signed_effect();
        self.wallets.apply(tx.wallet, reverse, "delete")?;
        self.transactions.remove(id)?;

        Ok(())
    }

    /// Estimate the cashback for a prospective or edited transaction
    ///
    /// This is the read-only entry point the UI calls while the user types;
    /// saving the transaction repeats the same computation, so the displayed
    /// estimate and the persisted value never diverge for identical inputs.
    ///
    /// # Arguments
    ///
    /// * `wallet` - Wallet the transaction would belong to
    /// * `category` - The transaction's category
    /// * `amount` - The transaction amount
    /// * `date` - The transaction date
    /// * `exclude` - The transaction being edited, if any
    ///
    /// # Errors
    ///
    /// * `UnknownWallet` / `UnknownCategory` - Dangling references
    pub fn estimate(
        &self,
        wallet: WalletId,
        category: CategoryId,
        amount: Decimal,
        date: NaiveDate,
        exclude: Option<TransactionId>,
    ) -> Result<RewardEstimate, LedgerError> {
        let wallet = self
            .wallets
            .get(wallet)
            .ok_or_else(|| LedgerError::unknown_wallet(wallet, "estimate"))?;
        if !self.categories.contains_key(&category) {
            return Err(LedgerError::unknown_category(category, exclude.unwrap_or(0)));
        }

        Ok(estimate(
            wallet,
            category,
            amount,
            date,
            self.transactions.iter(),
            exclude,
        ))
    }

    /// Per-rule cashback usage for a wallet's billing cycle containing `as_of`
    ///
    /// Non-credit wallets report no usage. Aggregation uses whatever rule set
    /// currently exists; rule changes apply retroactively.
    ///
    /// # Errors
    ///
    /// * `UnknownWallet` - No wallet with this id exists
    pub fn cycle_usage(
        &self,
        wallet: WalletId,
        as_of: NaiveDate,
    ) -> Result<Vec<RuleUsage>, LedgerError> {
        let wallet = self
            .wallets
            .get(wallet)
            .ok_or_else(|| LedgerError::unknown_wallet(wallet, "cycle_usage"))?;

        let terms = match wallet.credit_terms() {
            Some(terms) => terms,
            None => return Ok(Vec::new()),
        };

        let window = cycle_of(as_of, terms.cycle_start_day);
        let usage = terms
            .rules
            .iter()
            .map(|rule| {
                let earned = cycle_total(
                    rule,
                    wallet.id,
                    terms,
                    &window,
                    self.transactions.iter(),
                    None,
                );
                let remaining = rule
                    .is_capped()
                    .then(|| (rule.max_reward_per_period - earned).max(Decimal::ZERO));
                RuleUsage {
                    wallet: wallet.id,
                    rule: rule.id,
                    match_key: rule.match_key,
                    window,
                    earned,
                    cap: rule.max_reward_per_period,
                    remaining,
                }
            })
            .collect();

        Ok(usage)
    }

    /// All wallets with their current balances, sorted by wallet id
    pub fn wallets(&self) -> Vec<&Wallet> {
        self.wallets.all_sorted()
    }

    /// Look up a stored transaction
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    /// Number of stored transactions
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Reward estimation against validated references
    ///
    /// Callers have already resolved wallet and category, so the wallet
    /// lookup cannot fail here.
    fn estimate_internal(
        &self,
        draft: &TransactionDraft,
        exclude: Option<TransactionId>,
    ) -> RewardEstimate {
        match self.wallets.get(draft.wallet) {
            Some(wallet) => estimate(
                wallet,
                draft.category,
                draft.amount,
                draft.date,
                self.transactions.iter(),
                exclude,
            ),
            None => RewardEstimate::zero(),
        }
    }

    /// Guard conditions shared by create and update
    ///
    /// Runs before any mutation: an error here means the ledger is untouched.
    fn validate_draft(&self, draft: &TransactionDraft, operation: &str) -> Result<(), LedgerError> {
        if draft.amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(draft.amount, draft.id));
        }
        if !self.wallets.contains(draft.wallet) {
            return Err(LedgerError::unknown_wallet(draft.wallet, operation));
        }
        if !self.categories.contains_key(&draft.category) {
            return Err(LedgerError::unknown_category(draft.category, draft.id));
        }
        Ok(())
    }
}

/// Attach the computed reward to a draft, producing the persisted record
fn finalize(draft: TransactionDraft, reward: RewardEstimate) -> Transaction {
    Transaction {
        id: draft.id,
        wallet: draft.wallet,
        category: draft.category,
        kind: draft.kind,
        amount: draft.amount,
        date: draft.date,
        note: draft.note,
        cashback_amount: reward.amount,
        rule: reward.rule,
    }
}
