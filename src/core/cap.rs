//! Per-cycle reward cap enforcement
//!
//! Computes the reward a matched rule pays for a transaction, subject to the
//! rule's minimum-spend threshold and its rolling monthly cap. The cap is
//! tracked per rule: prior cashback attributed to the same rule inside the
//! same billing cycle reduces what the candidate transaction can earn, so a
//! sequence of transactions can never overshoot the cap.
//!
//! Attribution prefers the rule id stored on the transaction at save time.
//! Legacy records without a stored id fall back to a category heuristic: a
//! specific rule claims its own category, a catch-all rule claims every
//! category not taken by a specific rule of the same wallet. The heuristic is
//! lossy when rules are edited after the fact, which is exactly why new saves
//! always persist the rule id.

use crate::core::cycle::{cycle_of, CycleWindow};
use crate::types::{CashbackRule, CreditTerms, MatchKey, Transaction, TransactionId, WalletId};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Truncate a reward to whole currency units
///
/// Rewards are paid in the currency's minor unit; for VND-style currencies
/// that is the whole unit, and partial units are never paid out.
pub fn round_to_minor_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::ToZero)
}

/// Whether a stored transaction counts against `rule`'s cap
///
/// Stored rule id wins when present; otherwise the category heuristic
/// decides. Only ever meaningful for transactions of the rule's own wallet.
pub fn attributed_to_rule(tx: &Transaction, rule: &CashbackRule, terms: &CreditTerms) -> bool {
    if let Some(rule_id) = tx.rule {
        return rule_id == rule.id;
    }

    match rule.match_key {
        MatchKey::Category(category) => tx.category == category,
        MatchKey::All => !terms
            .rules
            .iter()
            .any(|other| other.match_key == MatchKey::Category(tx.category)),
    }
}

/// Sum cashback already attributed to `rule` inside `window`
///
/// # Arguments
///
/// * `rule` - The rule whose cap is being checked
/// * `wallet` - The rule's wallet; transactions of other wallets are ignored
/// * `terms` - The wallet's credit terms (for heuristic attribution)
/// * `window` - The billing cycle to aggregate over
/// * `transactions` - All stored transactions
/// * `exclude` - Transaction to leave out (the one being edited), if any
pub fn cycle_total<'a>(
    rule: &CashbackRule,
    wallet: WalletId,
    terms: &CreditTerms,
    window: &CycleWindow,
    transactions: impl Iterator<Item = &'a Transaction>,
    exclude: Option<TransactionId>,
) -> Decimal {
    transactions
        .filter(|tx| Some(tx.id) != exclude)
        .filter(|tx| tx.wallet == wallet)
        .filter(|tx| window.contains(tx.date))
        .filter(|tx| attributed_to_rule(tx, rule, terms))
        .map(|tx| tx.cashback_amount)
        .sum()
}

/// Compute the capped reward for a candidate transaction
///
/// # Arguments
///
/// * `rule` - The matched cashback rule
/// * `amount` - The (positive) transaction amount; validation is the caller's
///   responsibility, this function is total and side-effect-free
/// * `wallet` - The wallet the transaction belongs to
/// * `terms` - The wallet's credit terms
/// * `date` - Transaction date, used to locate the billing cycle
/// * `transactions` - All stored transactions, for cap accounting
/// * `exclude` - Transaction to leave out of cap accounting (when editing)
///
/// # Returns
///
/// The reward in whole currency units: zero below the minimum spend, the raw
/// percentage for uncapped rules, otherwise `min(raw, cap - already earned)`.
pub fn cap_reward<'a>(
    rule: &CashbackRule,
    amount: Decimal,
    wallet: WalletId,
    terms: &CreditTerms,
    date: NaiveDate,
    transactions: impl Iterator<Item = &'a Transaction>,
    exclude: Option<TransactionId>,
) -> Decimal {
    if amount < rule.min_spend {
        return Decimal::ZERO;
    }

    let raw = amount * rule.percentage / Decimal::from(100);

    if !rule.is_capped() {
        return round_to_minor_unit(raw);
    }

    let window = cycle_of(date, terms.cycle_start_day);
    let earned = cycle_total(rule, wallet, terms, &window, transactions, exclude);
    let remaining = (rule.max_reward_per_period - earned).max(Decimal::ZERO);

    round_to_minor_unit(raw.min(remaining))
}
