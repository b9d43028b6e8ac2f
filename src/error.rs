use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatementError {
    #[error("Invalid file format: {message}")]
    Format { message: String },

    #[error("File is empty")]
    EmptyFile,

    #[error("Amount must be greater than zero: {0}")]
    InvalidAmount(Decimal),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Failed to read the file: {0}")]
    FileRead(#[source] std::io::Error),

    #[error("CSV validation error: {message}")]
    CsvParse { message: String },

    #[error("Invalid date input: {message}")]
    InvalidDateInput { message: String },

    #[error("Invalid date range: start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Error occurred while calculating multi currency amounts: {source}")]
    Calculation {
        #[source]
        source: Box<StatementError>,
    },

    #[error("Account does not exist: {0}")]
    InvalidAccount(String),

    #[error("Error occurred while generating CSV: {message}")]
    GenerateCsv { message: String },

    #[error("No statements provided for CSV generation")]
    NoListFound,

    #[error("Input account number is required")]
    MissingAccountNumber,

    #[error("Amount overflow while summing {currency}")]
    AmountOverflow { currency: String },

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl StatementError {
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    pub fn invalid_date_input(message: impl Into<String>) -> Self {
        Self::InvalidDateInput {
            message: message.into(),
        }
    }

    /// Wraps any failure raised while computing currency totals.
    pub fn calculation(source: StatementError) -> Self {
        Self::Calculation {
            source: Box::new(source),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, StatementError>;
