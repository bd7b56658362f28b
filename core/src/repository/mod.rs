pub mod file;
pub mod traits;

use crate::error::ParseError;
use crate::model::transaction::TransactionRecord;

// Re-export
pub use file::{parse_transactions, CsvTransactionSource};
pub use traits::TransactionSource;

/// A row that was skipped while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// 1-based line in the source file, header included.
    pub line: u64,
    pub error: ParseError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub records: Vec<TransactionRecord>,
    pub failures: Vec<RowFailure>,
}
