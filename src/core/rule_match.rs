//! Cashback rule selection
//!
//! Selects the single applicable rule for a transaction from a credit
//! wallet's ordered rule list. A rule keyed to the transaction's category
//! always beats the catch-all; within the same precedence tier the first rule
//! in list order wins, so rule order is part of wallet configuration.

use crate::types::{CashbackRule, CategoryId, CreditTerms, MatchKey};

/// Select the rule applying to a transaction in `category`
///
/// # Arguments
///
/// * `terms` - The credit wallet's terms (rule list in configured order)
/// * `category` - Category of the candidate transaction
///
/// # Returns
///
/// * `Some(&CashbackRule)` - The first rule keyed to `category`, or failing
///   that the first catch-all rule
/// * `None` - No rule applies (the reward is simply zero)
pub fn match_rule(terms: &CreditTerms, category: CategoryId) -> Option<&CashbackRule> {
    terms
        .rules
        .iter()
        .find(|rule| rule.match_key == MatchKey::Category(category))
        .or_else(|| {
            terms
                .rules
                .iter()
                .find(|rule| rule.match_key == MatchKey::All)
        })
}
