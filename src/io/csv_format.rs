//! CSV format handling for reference data, the operation log, and reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - Record structures for deserialization of the four input files
//! - Conversion from CSV records to domain types, with validation
//! - Report serialization (balances, cashback cycle usage)
//!
//! All conversion functions are pure (no I/O) for easy testing.

use crate::core::RuleUsage;
use crate::types::{
    Category, CategoryId, CashbackRule, CreditTerms, LedgerError, MatchKey, Operation,
    TransactionDraft, TransactionId, TransactionKind, Wallet, WalletId, WalletKind,
    DEFAULT_CYCLE_START_DAY,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record for a row of `wallets.csv`
///
/// Columns: `id,name,kind,balance,credit_limit,statement_day,cycle_start_day`.
/// The last three are credit-only and must be empty for cash/debit wallets.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WalletCsvRecord {
    pub id: WalletId,
    pub name: String,
    pub kind: String,
    pub balance: String,
    pub credit_limit: Option<String>,
    pub statement_day: Option<u32>,
    pub cycle_start_day: Option<u32>,
}

/// CSV record for a row of `rules.csv`
///
/// Columns: `id,wallet,match_key,percentage,min_spend,max_reward_per_period`.
/// `match_key` is a category id or the sentinel `ALL`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RuleCsvRecord {
    pub id: u32,
    pub wallet: WalletId,
    pub match_key: String,
    pub percentage: String,
    pub min_spend: String,
    pub max_reward_per_period: String,
}

/// CSV record for a row of `categories.csv`
///
/// Columns: `id,name,kind,mcc` (`mcc` optional).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CategoryCsvRecord {
    pub id: CategoryId,
    pub name: String,
    pub kind: String,
    pub mcc: Option<String>,
}

/// CSV record for a row of the operation log
///
/// Columns: `op,id,wallet,category,kind,amount,date,note`. Only `op` and `id`
/// are required for deletes, which is why everything else is optional here;
/// conversion enforces presence for creates and updates.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OperationCsvRecord {
    pub op: String,
    pub id: TransactionId,
    pub wallet: Option<WalletId>,
    pub category: Option<CategoryId>,
    pub kind: Option<String>,
    pub amount: Option<String>,
    pub date: Option<String>,
    pub note: Option<String>,
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, String> {
    Decimal::from_str(value.trim()).map_err(|_| format!("Invalid {} '{}'", field, value))
}

fn parse_kind(value: &str) -> Result<TransactionKind, String> {
    match value.to_lowercase().as_str() {
        "expense" => Ok(TransactionKind::Expense),
        "income" => Ok(TransactionKind::Income),
        other => Err(format!("Invalid transaction kind '{}'", other)),
    }
}

/// Convert a WalletCsvRecord to a Wallet
///
/// Credit wallets get their terms (with defaults: statement day 1, cycle
/// start day 1, empty rule list; rules are attached from `rules.csv`).
/// Cash and debit wallets must leave all credit-only columns empty.
pub fn convert_wallet_record(record: WalletCsvRecord) -> Result<Wallet, String> {
    let balance = parse_decimal("balance", &record.balance)?;

    let kind = match record.kind.to_lowercase().as_str() {
        "credit" => {
            let credit_limit = match &record.credit_limit {
                Some(raw) if !raw.trim().is_empty() => parse_decimal("credit_limit", raw)?,
                _ => Decimal::ZERO,
            };
            WalletKind::Credit(CreditTerms {
                credit_limit,
                statement_day: record.statement_day.unwrap_or(1),
                cycle_start_day: record.cycle_start_day.unwrap_or(DEFAULT_CYCLE_START_DAY),
                rules: Vec::new(),
            })
        }
        "cash" | "debit" => {
            let has_credit_column = record
                .credit_limit
                .as_ref()
                .is_some_and(|v| !v.trim().is_empty())
                || record.statement_day.is_some()
                || record.cycle_start_day.is_some();
            if has_credit_column {
                return Err(format!(
                    "Wallet {} is {} but carries credit-only columns",
                    record.id, record.kind
                ));
            }
            if record.kind.to_lowercase() == "cash" {
                WalletKind::Cash
            } else {
                WalletKind::Debit
            }
        }
        other => return Err(format!("Invalid wallet kind '{}'", other)),
    };

    Ok(Wallet {
        id: record.id,
        name: record.name,
        balance,
        kind,
    })
}

/// Convert a RuleCsvRecord to the rule and the wallet it belongs to
pub fn convert_rule_record(record: RuleCsvRecord) -> Result<(WalletId, CashbackRule), String> {
    let match_key = if record.match_key.trim().eq_ignore_ascii_case("ALL") {
        MatchKey::All
    } else {
        let category = record
            .match_key
            .trim()
            .parse::<CategoryId>()
            .map_err(|_| format!("Invalid match_key '{}'", record.match_key))?;
        MatchKey::Category(category)
    };

    Ok((
        record.wallet,
        CashbackRule {
            id: record.id,
            match_key,
            percentage: parse_decimal("percentage", &record.percentage)?,
            min_spend: parse_decimal("min_spend", &record.min_spend)?,
            max_reward_per_period: parse_decimal(
                "max_reward_per_period",
                &record.max_reward_per_period,
            )?,
        },
    ))
}

/// Convert a CategoryCsvRecord to a Category
pub fn convert_category_record(record: CategoryCsvRecord) -> Result<Category, String> {
    Ok(Category {
        id: record.id,
        name: record.name,
        kind: parse_kind(&record.kind)?,
        mcc: record.mcc.filter(|m| !m.trim().is_empty()),
    })
}

/// Convert an OperationCsvRecord to an Operation
///
/// Creates and updates require the full set of transaction columns; deletes
/// ignore everything beyond `op,id`.
pub fn convert_operation_record(record: OperationCsvRecord) -> Result<Operation, String> {
    match record.op.to_lowercase().as_str() {
        "delete" => Ok(Operation::Delete { id: record.id }),
        op @ ("create" | "update") => {
            let draft = draft_from_record(&record)?;
            if op == "create" {
                Ok(Operation::Create(draft))
            } else {
                Ok(Operation::Update(draft))
            }
        }
        other => Err(format!(
            "Invalid operation '{}' for transaction {}",
            other, record.id
        )),
    }
}

fn draft_from_record(record: &OperationCsvRecord) -> Result<TransactionDraft, String> {
    let missing = |column: &str| {
        format!(
            "{} operation for transaction {} requires column '{}'",
            record.op, record.id, column
        )
    };

    let wallet = record.wallet.ok_or_else(|| missing("wallet"))?;
    let category = record.category.ok_or_else(|| missing("category"))?;
    let kind = parse_kind(record.kind.as_deref().ok_or_else(|| missing("kind"))?)?;
    let amount = parse_decimal(
        "amount",
        record.amount.as_deref().ok_or_else(|| missing("amount"))?,
    )?;
    let date = record
        .date
        .as_deref()
        .ok_or_else(|| missing("date"))?
        .trim()
        .parse()
        .map_err(|_| format!("Invalid date '{}'", record.date.as_deref().unwrap_or("")))?;

    Ok(TransactionDraft {
        id: record.id,
        wallet,
        category,
        kind,
        amount,
        date,
        note: record.note.clone().unwrap_or_default(),
    })
}

/// Write wallet balances to CSV format
///
/// Columns: `id,name,kind,balance`. Callers pass wallets sorted by id for
/// deterministic output.
pub fn write_balances_csv(wallets: &[&Wallet], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["id", "name", "kind", "balance"])?;
    for wallet in wallets {
        writer.write_record([
            wallet.id.to_string(),
            wallet.name.clone(),
            wallet.kind.label().to_string(),
            wallet.balance.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

/// Write per-rule cashback cycle usage to CSV format
///
/// Columns: `wallet,rule,match_key,cycle_start,cycle_end,earned,cap,remaining`
/// with `remaining` empty for uncapped rules.
pub fn write_cashback_csv(usage: &[RuleUsage], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "wallet",
        "rule",
        "match_key",
        "cycle_start",
        "cycle_end",
        "earned",
        "cap",
        "remaining",
    ])?;
    for row in usage {
        writer.write_record([
            row.wallet.to_string(),
            row.rule.to_string(),
            row.match_key.to_string(),
            row.window.start.to_string(),
            row.window.end.to_string(),
            row.earned.to_string(),
            row.cap.to_string(),
            row.remaining.map(|r| r.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
