//! File-in, report-out processing pipeline
//!
//! Orchestrates the complete run: load reference data, replay the operation
//! log through the ledger engine, and write the requested report. Reference
//! data must load completely; individual operation-log rows that fail to
//! parse or apply are reported on stderr and skipped, and processing
//! continues with the next row.

use crate::cli::{CliArgs, ReportKind};
use crate::core::{LedgerEngine, RuleUsage};
use crate::io::csv_format::{write_balances_csv, write_cashback_csv};
use crate::io::load::{load_categories, load_wallets};
use crate::io::sync_reader::SyncReader;
use crate::types::LedgerError;
use std::io::Write;

/// Run the pipeline described by the CLI arguments
///
/// # Arguments
///
/// * `args` - Parsed CLI arguments (input paths, report selection)
/// * `output` - Writer the report is produced on (stdout in the binary)
///
/// # Errors
///
/// Returns an error if reference data cannot be loaded or validated, the
/// operation log cannot be opened, or the report cannot be written. Bad
/// operation rows are not errors: they are logged to stderr and skipped.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), LedgerError> {
    let wallets = load_wallets(&args.wallets, &args.rules)?;
    let categories = load_categories(&args.categories)?;
    let mut engine = LedgerEngine::new(wallets, categories)?;

    let reader = SyncReader::new(&args.operations)?;
    for record in reader {
        match record {
            Ok(operation) => {
                if let Err(e) = engine.process(operation) {
                    eprintln!("Skipping operation: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Skipping record: {}", e);
            }
        }
    }

    match args.report {
        ReportKind::Balances => write_balances_csv(&engine.wallets(), output)?,
        ReportKind::Cashback => {
            let as_of = args
                .as_of
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            let mut usage: Vec<RuleUsage> = Vec::new();
            for wallet in engine.wallets() {
                usage.extend(engine.cycle_usage(wallet.id, as_of)?);
            }
            write_cashback_csv(&usage, output)?;
        }
    }

    Ok(())
}
