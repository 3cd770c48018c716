use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{debug, info};
use crate::expense::{parse_amount, Expense, HEADER};
use crate::store::columns::ColumnInfo;

pub(crate) mod columns;


/// Number of delimiters in a well formed row
const EXPECTED_DELIMITERS: usize = HEADER.len() - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    IoError(String),
    CsvError(String),
    InvalidAmount(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::IoError(s) => write!(f, "expense file error: {}", s),
            StoreError::CsvError(s) => write!(f, "expense file error: {}", s),
            StoreError::InvalidAmount(s) => write!(f, "invalid amount: {}", s),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::IoError(err.to_string())
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::CsvError(err.to_string())
    }
}

/// A row of the expense file that doesn't have the expected number of fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MalformedRow {
    /// 1-based line number in the file
    pub(crate) line: u64,
    pub(crate) delimiters: usize,
}

/// Flat comma separated file holding every expense ever entered.
/// The file is opened and closed within each call.
pub(crate) struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> ExpenseStore {
        ExpenseStore { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with a header row if it doesn't exist yet. Returns whether a file was created.
    pub(crate) fn ensure_initialized(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(HEADER)?;
        writer.flush()?;

        info!("Created expense file {}", self.path.display());
        Ok(true)
    }

    /// Append one expense, writing the header first if the file is empty.
    pub(crate) fn append(&self, expense: &Expense) -> Result<(), StoreError> {
        let amount = match expense.amount {
            Some(amount) if amount.is_finite() => amount,
            _ => return Err(StoreError::InvalidAmount(expense.amount_display())),
        };

        let mut file = OpenOptions::new().read(true).append(true).create(true).open(&self.path)?;
        let len = file.metadata()?.len();
        if len > 0 {
            // A hand edited file may lack the trailing newline
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if len == 0 {
            writer.write_record(HEADER)?;
        }
        writer.write_record([
            expense.date.as_str(),
            expense.category.as_str(),
            amount.to_string().as_str(),
            expense.description.as_str(),
        ])?;
        writer.flush()?;

        debug!("Appended {:?} to {}", expense, self.path.display());
        Ok(())
    }

    /// Read every expense in the file. Rows with the wrong number of fields are skipped and
    /// non-numeric amounts are kept as `None`. A missing or empty file gives an empty list.
    pub(crate) fn load_all(&self) -> Result<Vec<Expense>, StoreError> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let rows = self.read_rows()?;
        let Some(first_row) = rows.first() else {
            return Ok(vec![]);
        };
        let columns = ColumnInfo::detect(first_row);

        Ok(normalise_rows(&rows, &columns))
    }

    /// Report every row whose delimiter count isn't 3.
    pub(crate) fn diagnose(&self) -> Result<Vec<MalformedRow>, StoreError> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let mut reader = ReaderBuilder::new().has_headers(false).flexible(true).from_path(&self.path)?;
        let mut malformed = vec![];
        for record in reader.records() {
            let row = match record {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    debug!("Unreadable row: {}", e);
                    continue;
                }
            };
            let delimiters = row.len().saturating_sub(1);
            if delimiters != EXPECTED_DELIMITERS {
                let line = row.position().map(|p| p.line()).unwrap_or(0);
                malformed.push(MalformedRow { line, delimiters });
            }
        }

        Ok(malformed)
    }

    fn read_rows(&self) -> Result<Vec<StringRecord>, StoreError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&self.path)?;

        let mut rows = vec![];
        for record in reader.records() {
            match record {
                Ok(row) => rows.push(row),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => debug!("Skipping unreadable row: {}", e),
            }
        }
        Ok(rows)
    }
}

/// Turn raw rows into expenses using the detected column layout.
fn normalise_rows(rows: &[StringRecord], columns: &ColumnInfo) -> Vec<Expense> {
    let skip = if columns.has_header { 1 } else { 0 };
    let mut expenses = vec![];
    for row in rows.iter().skip(skip) {
        if row.len() != columns.width {
            debug!("Skipping row with {} fields at line {:?}", row.len(), row.position().map(|p| p.line()));
            continue;
        }

        let field = |i: usize| row.get(i).unwrap_or("").to_string();
        expenses.push(Expense {
            date: field(columns.date_column),
            category: field(columns.category_column),
            amount: parse_amount(&field(columns.amount_column)),
            description: field(columns.description_column),
        });
    }
    expenses
}
