//! Persistence for statement records.

pub mod csv_file;
pub mod memory;

pub use csv_file::CsvFileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::filter::DateRange;
use crate::statement::StatementRecord;

pub trait StatementStore {
    /// Persists every statement in one step and returns them with ids assigned.
    fn save_all(
        &mut self,
        statements: Vec<StatementRecord>,
    ) -> Result<Vec<StatementRecord>, StoreError>;

    fn find_all(&self) -> Result<Vec<StatementRecord>, StoreError>;

    fn find_by_operation_date_between(
        &self,
        range: &DateRange,
    ) -> Result<Vec<StatementRecord>, StoreError>;

    fn find_by_account_number_and_operation_date_between(
        &self,
        account_number: &str,
        range: &DateRange,
    ) -> Result<Vec<StatementRecord>, StoreError>;

    fn exists_by_account_number(&self, account_number: &str) -> Result<bool, StoreError>;
}
