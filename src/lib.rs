pub mod aggregate;
pub mod codec;
pub mod config;
pub mod currency;
pub mod error;
pub mod filter;
pub mod service;
pub mod statement;
pub mod store;
pub mod upload;
pub mod validator;

pub use currency::Currency;
pub use error::{Result, StatementError, StoreError};
pub use filter::DateRange;
pub use service::{CsvExport, StatementService};
pub use statement::StatementRecord;
pub use store::{CsvFileStore, MemoryStore, StatementStore};
pub use upload::{FileUpload, MemoryUpload, Upload};
