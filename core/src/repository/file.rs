use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{LoadError, ParseError};
use crate::model::transaction::{RawTransactionRow, TransactionRecord, REQUIRED_COLUMNS};
use crate::repository::traits::TransactionSource;
use crate::repository::{LoadReport, RowFailure};

pub const DEFAULT_FILE_NAME: &str = "data.csv";

#[derive(Clone, Debug)]
pub struct CsvTransactionSource {
    file_path: PathBuf,
}

impl CsvTransactionSource {
    pub fn new(file_path: Option<PathBuf>) -> Self {
        let file_path = file_path.unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));
        CsvTransactionSource { file_path }
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }
}

impl TransactionSource for CsvTransactionSource {
    fn load(&self) -> Result<LoadReport, LoadError> {
        let file = File::open(&self.file_path).map_err(|source| LoadError::Open {
            path: self.file_path.clone(),
            source,
        })?;
        let report = parse_transactions(BufReader::new(file))?;
        tracing::info!(
            path = %self.file_path.display(),
            records = report.records.len(),
            skipped = report.failures.len(),
            "loaded transaction log"
        );
        Ok(report)
    }
}

/// Reads a headered CSV transaction log.
///
/// The header must name every column in [`REQUIRED_COLUMNS`]; other columns
/// are ignored. Rows that fail to parse are logged and collected instead of
/// aborting the load.
pub fn parse_transactions<R: Read>(reader: R) -> Result<LoadReport, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut report = LoadReport::default();
    let mut record = StringRecord::new();
    loop {
        let line = rdr.position().line();
        match rdr.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
            Err(err) => {
                record_failure(&mut report, line, ParseError::MalformedRow(err.to_string()));
                continue;
            }
        }
        let line = record.position().map(|p| p.line()).unwrap_or(line);

        let parsed = record
            .deserialize::<RawTransactionRow>(Some(&headers))
            .map_err(|err| ParseError::MalformedRow(err.to_string()))
            .and_then(|row| TransactionRecord::parse(&row));

        match parsed {
            Ok(transaction) => report.records.push(transaction),
            Err(error) => record_failure(&mut report, line, error),
        }
    }

    Ok(report)
}

fn record_failure(report: &mut LoadReport, line: u64, error: ParseError) {
    tracing::warn!(line, %error, "skipping transaction row");
    report.failures.push(RowFailure { line, error });
}
