//! Ledger & Reward Engine CLI
//!
//! Command-line interface for replaying a personal-finance operation log
//! against wallet reference data.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --wallets wallets.csv --rules rules.csv --categories categories.csv \
//!     operations.csv > balances.csv
//! cargo run -- --wallets wallets.csv --rules rules.csv --categories categories.csv \
//!     --report cashback --as-of 2024-03-15 operations.csv > cashback.csv
//! ```
//!
//! The program loads wallets, cashback rules, and categories, replays the
//! operation log (create/update/delete of transactions) through the ledger
//! engine, and writes the selected report to stdout. Malformed or rejected
//! operations are reported on stderr and skipped.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing files, malformed reference data, etc.)

use ledger_engine::cli;
use ledger_engine::pipeline;
use std::process;

fn main() {
    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = pipeline::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
