use chrono::NaiveDate;
use csv::{ErrorKind, ReaderBuilder};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{error, info};

use crate::aggregate::sum_by_currency;
use crate::codec;
use crate::error::{Result, StatementError};
use crate::filter::DateRange;
use crate::statement::StatementRecord;
use crate::store::StatementStore;
use crate::upload::{Upload, CSV_CONTENT_TYPE};

/// Attachment name offered for exported statements.
pub const EXPORT_FILE_NAME: &str = "statements.csv";

/// Generated export body plus the metadata a response writer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl CsvExport {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

/// Import, export and aggregation over a statement store.
pub struct StatementService<S: StatementStore> {
    store: S,
}

impl<S: StatementStore> StatementService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ensure_csv_file<U: Upload + ?Sized>(&self, upload: &U) -> Result<()> {
        match upload.content_type() {
            Some(CSV_CONTENT_TYPE) => Ok(()),
            other => {
                error!("Invalid file format: {:?}", other);
                Err(StatementError::format(format!(
                    "expected content type {}, got {}",
                    CSV_CONTENT_TYPE,
                    other.unwrap_or("none")
                )))
            }
        }
    }

    /// Decodes every data row and saves them in a single call.
    ///
    /// The first invalid row aborts the import and nothing is saved.
    pub fn import_csv<U: Upload + ?Sized>(&mut self, upload: &U) -> Result<usize> {
        info!("Importing statements from upload");
        if upload.is_empty() {
            error!("The file you are importing is empty.");
            return Err(StatementError::EmptyFile);
        }

        let reader = upload.reader().map_err(|e| {
            error!("Failed to read the file: {}", e);
            StatementError::FileRead(e)
        })?;
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let mut statements = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(read_error)?;
            let statement = codec::decode_row(&record).map_err(|e| {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                error!("Rejecting import at line {}: {}", line, e);
                e
            })?;
            statements.push(statement);
        }

        let saved = self.store.save_all(statements)?;
        info!("New statements saved: {}", saved.len());

        Ok(saved.len())
    }

    pub fn filtered_statements(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<StatementRecord>> {
        let range = DateRange::new(start_date, end_date)?;
        Ok(self.store.find_by_operation_date_between(&range)?)
    }

    pub fn filtered_account_statements(
        &self,
        account_number: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<StatementRecord>> {
        let account_number = account_number.ok_or_else(|| {
            error!("No input account number was provided.");
            StatementError::MissingAccountNumber
        })?;

        let range = DateRange::new(start_date, end_date)?;
        Ok(self
            .store
            .find_by_account_number_and_operation_date_between(account_number, &range)?)
    }

    /// Totals the account's amounts per currency code within the date range.
    pub fn multicurrency_amounts(
        &self,
        account_number: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<BTreeMap<String, Decimal>> {
        if !self.store.exists_by_account_number(account_number)? {
            error!("Input account does not exist: {}", account_number);
            return Err(StatementError::InvalidAccount(account_number.to_string()));
        }

        let totals = self
            .filtered_account_statements(Some(account_number), start_date, end_date)
            .and_then(|statements| sum_by_currency(&statements))
            .map_err(|e| {
                error!("Calculation failed for account {}: {}", account_number, e);
                StatementError::calculation(e)
            })?;
        info!(
            "Calculated {} currency totals for account {}",
            totals.len(),
            account_number
        );

        Ok(totals)
    }

    pub fn generate_csv(&self, statements: &[StatementRecord]) -> Result<String> {
        if statements.is_empty() {
            error!("No statements found.");
            return Err(StatementError::NoListFound);
        }

        let csv = codec::encode_to_string(statements)?;
        info!("Generated CSV for {} statements", statements.len());

        Ok(csv)
    }

    pub fn export_csv(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<CsvExport> {
        let statements = self.filtered_statements(start_date, end_date)?;

        Ok(CsvExport {
            file_name: EXPORT_FILE_NAME,
            content_type: CSV_CONTENT_TYPE,
            body: self.generate_csv(&statements)?,
        })
    }
}

fn read_error(e: csv::Error) -> StatementError {
    error!("CSV validation error: {}", e);
    match e.into_kind() {
        ErrorKind::Io(io) => StatementError::FileRead(io),
        kind => StatementError::CsvParse {
            message: csv_kind_message(&kind),
        },
    }
}

fn csv_kind_message(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => format!(
            "line {}: expected {} fields, found {}",
            pos.as_ref().map(|p| p.line()).unwrap_or_default(),
            expected_len,
            len
        ),
        ErrorKind::Utf8 { pos, err } => format!(
            "line {}: {}",
            pos.as_ref().map(|p| p.line()).unwrap_or_default(),
            err
        ),
        other => format!("{:?}", other),
    }
}
