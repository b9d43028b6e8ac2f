pub mod statement_service;


pub use statement_service::{CsvExport, StatementService, EXPORT_FILE_NAME};
