use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Process a personal-finance operation log against wallets with cashback rules
#[derive(Parser, Debug)]
#[command(name = "ledger-engine")]
#[command(about = "Replay a transaction operation log and report wallet balances or cashback usage", long_about = None)]
pub struct CliArgs {
    /// Input CSV file containing the operation log
    #[arg(value_name = "OPERATIONS", help = "Path to the operation log CSV file")]
    pub operations: PathBuf,

    /// Wallet reference data
    #[arg(long = "wallets", value_name = "FILE", help = "Path to wallets.csv")]
    pub wallets: PathBuf,

    /// Cashback rule reference data
    #[arg(long = "rules", value_name = "FILE", help = "Path to rules.csv")]
    pub rules: PathBuf,

    /// Category reference data
    #[arg(long = "categories", value_name = "FILE", help = "Path to categories.csv")]
    pub categories: PathBuf,

    /// Which report to write to stdout after processing
    #[arg(
        long = "report",
        value_name = "REPORT",
        default_value = "balances",
        help = "Report to produce: 'balances' or 'cashback'"
    )]
    pub report: ReportKind,

    /// Reference date for the cashback report's billing cycles
    #[arg(
        long = "as-of",
        value_name = "DATE",
        help = "Cycle reference date for the cashback report (YYYY-MM-DD, default: today)"
    )]
    pub as_of: Option<NaiveDate>,
}

/// Available report outputs
#[derive(Clone, Debug, ValueEnum)]
pub enum ReportKind {
    /// Final wallet balances
    Balances,
    /// Per-rule cashback usage in the cycle containing the as-of date
    Cashback,
}
