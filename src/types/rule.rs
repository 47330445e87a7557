//! Cashback rule types
//!
//! A cashback rule belongs to a credit wallet and maps a match key (a specific
//! category, or "everything else") to a reward percentage, a minimum spend
//! threshold, and a per-cycle reward cap.

use super::transaction::{CategoryId, RuleId};
use rust_decimal::Decimal;

/// What a cashback rule applies to
///
/// A specific category key always wins over `All`; `All` catches every
/// category not claimed by a more specific rule in the same wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKey {
    /// The rule applies to transactions in exactly this category
    Category(CategoryId),

    /// Catch-all: applies to anything not matched by a specific rule
    All,
}

impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKey::Category(id) => write!(f, "{}", id),
            MatchKey::All => write!(f, "ALL"),
        }
    }
}

/// A single cashback rule on a credit wallet
///
/// Rule identity is stable and is the unit the per-cycle cap is tracked
/// against: the sum of `cashback_amount` over transactions attributed to one
/// rule inside one billing cycle never exceeds `max_reward_per_period`.
#[derive(Debug, Clone, PartialEq)]
pub struct CashbackRule {
    /// Unique rule identifier
    pub id: RuleId,

    /// Category key or catch-all
    pub match_key: MatchKey,

    /// Reward percentage, 0-100
    pub percentage: Decimal,

    /// Minimum transaction amount (inclusive) to earn any reward
    pub min_spend: Decimal,

    /// Maximum total reward per billing cycle; 0 means unlimited
    pub max_reward_per_period: Decimal,
}

impl CashbackRule {
    /// Whether this rule caps the reward per cycle
    pub fn is_capped(&self) -> bool {
        self.max_reward_per_period > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_key_display() {
        assert_eq!(MatchKey::Category(42).to_string(), "42");
        assert_eq!(MatchKey::All.to_string(), "ALL");
    }

    #[test]
    fn test_zero_cap_means_unlimited() {
        let rule = CashbackRule {
            id: 1,
            match_key: MatchKey::All,
            percentage: Decimal::from(5),
            min_spend: Decimal::ZERO,
            max_reward_per_period: Decimal::ZERO,
        };
        assert!(!rule.is_capped());
    }
}
