//! Reward estimation entry point
//!
//! Composes rule matching, cycle calculation, and cap enforcement into the
//! single function the UI calls both for live estimation (as the user types
//! an amount) and for the value persisted onto the transaction at save time.
//! Both calls are pure repeats of the same computation, so the displayed
//! estimate and the saved value can never diverge for identical inputs.

use crate::core::cap::cap_reward;
use crate::core::rule_match::match_rule;
use crate::types::{CategoryId, RuleId, Transaction, TransactionId, Wallet, WalletKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Outcome of a reward estimation
///
/// Zero with no rule is the normal outcome for non-credit wallets, invalid
/// amounts, and unmatched categories; it is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardEstimate {
    /// The reward in whole currency units (>= 0)
    pub amount: Decimal,

    /// The rule that produced the reward; persisted onto the transaction so
    /// cap accounting never has to guess later
    pub rule: Option<RuleId>,
}

impl RewardEstimate {
    /// The "no reward" estimate
    pub fn zero() -> Self {
        RewardEstimate {
            amount: Decimal::ZERO,
            rule: None,
        }
    }
}

/// Estimate the cashback for a prospective or edited transaction
///
/// # Arguments
///
/// * `wallet` - The wallet the transaction would be attributed to
/// * `category` - The transaction's category
/// * `amount` - The transaction amount
/// * `date` - The transaction date
/// * `transactions` - All stored transactions, for cap accounting
/// * `exclude` - The transaction being edited, excluded from cap accounting
///
/// # Returns
///
/// A [`RewardEstimate`]; zero when the wallet is not a credit wallet, the
/// amount is not positive, or no rule matches the category.
pub fn estimate<'a>(
    wallet: &Wallet,
    category: CategoryId,
    amount: Decimal,
    date: NaiveDate,
    transactions: impl Iterator<Item = &'a Transaction>,
    exclude: Option<TransactionId>,
) -> RewardEstimate {
    let terms = match &wallet.kind {
        WalletKind::Credit(terms) => terms,
        _ => return RewardEstimate::zero(),
    };

    if amount <= Decimal::ZERO {
        return RewardEstimate::zero();
    }

    let rule = match match_rule(terms, category) {
        Some(rule) => rule,
        None => return RewardEstimate::zero(),
    };

    let reward = cap_reward(rule, amount, wallet.id, terms, date, transactions, exclude);

    RewardEstimate {
        amount: reward,
        rule: Some(rule.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CashbackRule, CreditTerms, MatchKey};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn credit_wallet(rules: Vec<CashbackRule>) -> Wallet {
        Wallet {
            id: 1,
            name: "Card".to_string(),
            balance: Decimal::ZERO,
            kind: WalletKind::Credit(CreditTerms {
                credit_limit: Decimal::from(50_000_000),
                statement_day: 1,
                cycle_start_day: 1,
                rules,
            }),
        }
    }

    fn five_percent_rule() -> CashbackRule {
        CashbackRule {
            id: 10,
            match_key: MatchKey::All,
            percentage: Decimal::from(5),
            min_spend: Decimal::ZERO,
            max_reward_per_period: Decimal::ZERO,
        }
    }

    #[test]
    fn test_non_credit_wallet_earns_nothing() {
        let wallet = Wallet {
            id: 1,
            name: "Cash".to_string(),
            balance: Decimal::ZERO,
            kind: WalletKind::Cash,
        };
        let est = estimate(
            &wallet,
            7,
            Decimal::from(1_000_000),
            date(2024, 3, 10),
            [].iter(),
            None,
        );
        assert_eq!(est, RewardEstimate::zero());
    }

    #[test]
    fn test_non_positive_amount_earns_nothing() {
        let wallet = credit_wallet(vec![five_percent_rule()]);
        for amount in [Decimal::ZERO, Decimal::from(-500)] {
            let est = estimate(&wallet, 7, amount, date(2024, 3, 10), [].iter(), None);
            assert_eq!(est, RewardEstimate::zero());
        }
    }

    #[test]
    fn test_unmatched_category_earns_nothing() {
        let wallet = credit_wallet(vec![CashbackRule {
            match_key: MatchKey::Category(3),
            ..five_percent_rule()
        }]);
        let est = estimate(
            &wallet,
            7,
            Decimal::from(1_000_000),
            date(2024, 3, 10),
            [].iter(),
            None,
        );
        assert_eq!(est, RewardEstimate::zero());
    }

    #[test]
    fn test_matched_rule_pays_and_reports_rule_id() {
        let wallet = credit_wallet(vec![five_percent_rule()]);
        let est = estimate(
            &wallet,
            7,
            Decimal::from(1_000_000),
            date(2024, 3, 10),
            [].iter(),
            None,
        );
        assert_eq!(est.amount, Decimal::from(50_000));
        assert_eq!(est.rule, Some(10));
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let wallet = credit_wallet(vec![five_percent_rule()]);
        let first = estimate(
            &wallet,
            7,
            Decimal::from(1_234_567),
            date(2024, 3, 10),
            [].iter(),
            None,
        );
        let second = estimate(
            &wallet,
            7,
            Decimal::from(1_234_567),
            date(2024, 3, 10),
            [].iter(),
            None,
        );
        assert_eq!(first, second);
    }
}
