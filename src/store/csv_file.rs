use csv::{ReaderBuilder, Writer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::filter::DateRange;
use crate::statement::StatementRecord;
use crate::store::{MemoryStore, StatementStore};

/// Store persisted as a CSV file with an `id` column.
///
/// The whole file is rewritten on every save, through a temporary file that
/// replaces the original only once it is complete.
#[derive(Debug)]
pub struct CsvFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl CsvFileStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let statements = if path.exists() {
            let mut rdr = ReaderBuilder::new().from_path(&path)?;
            rdr.deserialize::<StatementRecord>()
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };
        info!(
            "Loaded {} statements from {}",
            statements.len(),
            path.display()
        );

        Ok(Self {
            path,
            inner: MemoryStore::with_statements(statements),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path the next save is written to, `<file name>.tmp`.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn persist(&self, statements: &[StatementRecord]) -> Result<(), StoreError> {
        let tmp = self.temp_path();
        {
            let mut wtr = Writer::from_path(&tmp)?;
            for statement in statements {
                wtr.serialize(statement)?;
            }
            wtr.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!("Wrote {} statements to {}", statements.len(), self.path.display());

        Ok(())
    }
}

impl StatementStore for CsvFileStore {
    fn save_all(
        &mut self,
        statements: Vec<StatementRecord>,
    ) -> Result<Vec<StatementRecord>, StoreError> {
        let mut next = self.inner.clone();
        let saved = next.save_all(statements)?;

        self.persist(next.statements())?;
        self.inner = next;

        Ok(saved)
    }

    fn find_all(&self) -> Result<Vec<StatementRecord>, StoreError> {
        self.inner.find_all()
    }

    fn find_by_operation_date_between(
        &self,
        range: &DateRange,
    ) -> Result<Vec<StatementRecord>, StoreError> {
        self.inner.find_by_operation_date_between(range)
    }

    fn find_by_account_number_and_operation_date_between(
        &self,
        account_number: &str,
        range: &DateRange,
    ) -> Result<Vec<StatementRecord>, StoreError> {
        self.inner
            .find_by_account_number_and_operation_date_between(account_number, range)
    }

    fn exists_by_account_number(&self, account_number: &str) -> Result<bool, StoreError> {
        self.inner.exists_by_account_number(account_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tempfile::tempdir;

    fn statement(comment: &str, amount: &str) -> StatementRecord {
        StatementRecord::new(
            "123456",
            NaiveDate::from_ymd_opt(2023, 6, 24)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            "Tom Hanks",
            comment,
            Decimal::from_str(amount).unwrap(),
            Currency::from_code("USD").unwrap(),
        )
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = CsvFileStore::open(dir.path().join("store.csv")).unwrap();

        assert!(store.find_all().unwrap().is_empty());
        assert!(!store.exists_by_account_number("123456").unwrap());
    }

    #[test]
    fn test_saved_statements_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.csv");

        let mut store = CsvFileStore::open(&path).unwrap();
        store
            .save_all(vec![
                statement("rent, june", "100.00"),
                statement("Payment", "0.50"),
            ])
            .unwrap();

        let reopened = CsvFileStore::open(&path).unwrap();
        let statements = reopened.find_all().unwrap();

        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].id, Some(1));
        assert_eq!(statements[0].comment, "rent, june");
        assert_eq!(statements[0].amount.to_string(), "100.00");
        assert_eq!(statements[1].amount.to_string(), "0.50");
        assert_eq!(statements[1].currency.code(), "USD");
        assert!(!dir.path().join("store.csv.tmp").exists());
    }

    #[test]
    fn test_save_leaves_neighbouring_files_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.csv");
        let neighbour = dir.path().join("store.tmp");
        fs::write(&neighbour, "keep me").unwrap();

        let mut store = CsvFileStore::open(&path).unwrap();
        store.save_all(vec![statement("Payment", "1.00")]).unwrap();

        assert_eq!(fs::read_to_string(&neighbour).unwrap(), "keep me");
        assert_eq!(store.temp_path(), dir.path().join("store.csv.tmp"));
    }

    #[test]
    fn test_store_file_with_tmp_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("statements.tmp");

        CsvFileStore::open(&path)
            .unwrap()
            .save_all(vec![statement("Payment", "3.00")])
            .unwrap();

        let reopened = CsvFileStore::open(&path).unwrap();
        assert_eq!(reopened.find_all().unwrap().len(), 1);
        assert!(!dir.path().join("statements.tmp.tmp").exists());
    }

    #[test]
    fn test_ids_continue_after_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.csv");

        CsvFileStore::open(&path)
            .unwrap()
            .save_all(vec![statement("first", "1")])
            .unwrap();

        let mut reopened = CsvFileStore::open(&path).unwrap();
        let saved = reopened.save_all(vec![statement("second", "2")]).unwrap();

        assert_eq!(saved[0].id, Some(2));
        assert_eq!(reopened.find_all().unwrap().len(), 2);
    }
}
