//! I/O module
//!
//! Handles CSV parsing and report output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, report serialization)
//! - `sync_reader` - Streaming reader over the operation log
//! - `load` - Whole-file loaders for wallets, rules, and categories

pub mod csv_format;
pub mod load;
pub mod sync_reader;

pub use csv_format::{
    convert_category_record, convert_operation_record, convert_rule_record, convert_wallet_record,
    write_balances_csv, write_cashback_csv,
};
pub use load::{load_categories, load_wallets};
pub use sync_reader::SyncReader;
