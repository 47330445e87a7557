//! Whole-file loaders for reference data
//!
//! Wallets, cashback rules, and categories are small reference files loaded
//! completely before the operation log is processed. Unlike the operation
//! log, a bad row here is fatal: the engine refuses to start with partial
//! reference data.

use crate::io::csv_format::{
    convert_category_record, convert_rule_record, convert_wallet_record, CategoryCsvRecord,
    RuleCsvRecord, WalletCsvRecord,
};
use crate::types::{Category, LedgerError, Wallet, WalletKind};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read and convert every row of a reference CSV file
///
/// Conversion errors are reported with the 1-based line number of the failing
/// row (line 1 is the header).
fn load_all<R, T>(
    path: &Path,
    convert: impl Fn(R) -> Result<T, String>,
) -> Result<Vec<T>, LedgerError>
where
    R: DeserializeOwned,
{
    if !path.exists() {
        return Err(LedgerError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut items = Vec::new();
    for (index, row) in reader.deserialize::<R>().enumerate() {
        let line = (index + 2) as u64;
        let record = row?;
        let item = convert(record).map_err(|message| LedgerError::ParseError {
            line: Some(line),
            message,
        })?;
        items.push(item);
    }

    Ok(items)
}

/// Load wallets and attach their cashback rules
///
/// Rules keep their file order within each wallet; that order breaks ties
/// between rules sharing a match key.
///
/// # Errors
///
/// * `FileNotFound` / `ParseError` - Unreadable or malformed rows
/// * `UnknownWallet` - A rule references a wallet id not in `wallets.csv`
/// * `RuleOnNonCreditWallet` - A rule references a cash or debit wallet
pub fn load_wallets(wallets_path: &Path, rules_path: &Path) -> Result<Vec<Wallet>, LedgerError> {
    let mut wallets: Vec<Wallet> =
        load_all(wallets_path, |r: WalletCsvRecord| convert_wallet_record(r))?;
    let rules = load_all(rules_path, |r: RuleCsvRecord| convert_rule_record(r))?;

    for (wallet_id, rule) in rules {
        let wallet = wallets
            .iter_mut()
            .find(|w| w.id == wallet_id)
            .ok_or_else(|| LedgerError::unknown_wallet(wallet_id, "rule"))?;
        match &mut wallet.kind {
            WalletKind::Credit(terms) => terms.rules.push(rule),
            _ => {
                return Err(LedgerError::rule_on_non_credit_wallet(rule.id, wallet_id));
            }
        }
    }

    Ok(wallets)
}

/// Load the category list
pub fn load_categories(path: &Path) -> Result<Vec<Category>, LedgerError> {
    load_all(path, |r: CategoryCsvRecord| convert_category_record(r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchKey;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    const WALLETS: &str = "id,name,kind,balance,credit_limit,statement_day,cycle_start_day\n\
        1,Cash,cash,15000000,,,\n\
        2,Rewards Card,credit,-5000000,50000000,15,15\n";

    #[test]
    fn test_load_wallets_attaches_rules_in_order() {
        let wallets_file = create_temp_csv(WALLETS);
        let rules_file = create_temp_csv(
            "id,wallet,match_key,percentage,min_spend,max_reward_per_period\n\
             1,2,7,6,0,600000\n\
             2,2,ALL,0.1,0,0\n",
        );

        let wallets = load_wallets(wallets_file.path(), rules_file.path()).unwrap();
        assert_eq!(wallets.len(), 2);

        let terms = wallets[1].credit_terms().unwrap();
        assert_eq!(terms.rules.len(), 2);
        assert_eq!(terms.rules[0].match_key, MatchKey::Category(7));
        assert_eq!(terms.rules[1].match_key, MatchKey::All);
    }

    #[test]
    fn test_rule_for_unknown_wallet_fails() {
        let wallets_file = create_temp_csv(WALLETS);
        let rules_file = create_temp_csv(
            "id,wallet,match_key,percentage,min_spend,max_reward_per_period\n\
             1,9,ALL,5,0,0\n",
        );

        let result = load_wallets(wallets_file.path(), rules_file.path());
        assert!(matches!(
            result.err(),
            Some(LedgerError::UnknownWallet { wallet: 9, .. })
        ));
    }

    #[test]
    fn test_rule_for_cash_wallet_fails() {
        let wallets_file = create_temp_csv(WALLETS);
        let rules_file = create_temp_csv(
            "id,wallet,match_key,percentage,min_spend,max_reward_per_period\n\
             1,1,ALL,5,0,0\n",
        );

        let result = load_wallets(wallets_file.path(), rules_file.path());
        assert!(matches!(
            result.err(),
            Some(LedgerError::RuleOnNonCreditWallet { rule: 1, wallet: 1 })
        ));
    }

    #[test]
    fn test_malformed_wallet_row_reports_line() {
        let wallets_file = create_temp_csv(
            "id,name,kind,balance,credit_limit,statement_day,cycle_start_day\n\
             1,Cash,cash,15000000,,,\n\
             2,Broken,savings,0,,,\n",
        );
        let rules_file =
            create_temp_csv("id,wallet,match_key,percentage,min_spend,max_reward_per_period\n");

        let result = load_wallets(wallets_file.path(), rules_file.path());
        match result {
            Err(LedgerError::ParseError { line, message }) => {
                assert_eq!(line, Some(3));
                assert!(message.contains("Invalid wallet kind"));
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_categories() {
        let file = create_temp_csv(
            "id,name,kind,mcc\n\
             1,Groceries,expense,5411\n\
             2,Salary,income,\n",
        );
        let categories = load_categories(file.path()).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].mcc.as_deref(), Some("5411"));
        assert!(categories[1].mcc.is_none());
    }

    #[test]
    fn test_missing_file_fails() {
        let result = load_categories(Path::new("nope.csv"));
        assert!(matches!(
            result.err(),
            Some(LedgerError::FileNotFound { .. })
        ));
    }
}
