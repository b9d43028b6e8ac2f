use crate::error::StoreError;
use crate::filter::{filter_statements, DateRange};
use crate::statement::StatementRecord;
use crate::store::StatementStore;

#[derive(Debug, Clone)]
pub struct MemoryStore {
    statements: Vec<StatementRecord>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
            next_id: 1,
        }
    }

    /// Seeds the store with already persisted statements.
    pub fn with_statements(statements: Vec<StatementRecord>) -> Self {
        let mut store = Self::new();
        store.next_id = statements.iter().filter_map(|s| s.id).max().unwrap_or(0) + 1;
        store.statements = statements;
        store.assign_missing_ids();
        store
    }

    pub fn statements(&self) -> &[StatementRecord] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    fn assign_missing_ids(&mut self) {
        for statement in self.statements.iter_mut().filter(|s| s.id.is_none()) {
            statement.id = Some(self.next_id);
            self.next_id += 1;
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementStore for MemoryStore {
    fn save_all(
        &mut self,
        statements: Vec<StatementRecord>,
    ) -> Result<Vec<StatementRecord>, StoreError> {
        let mut saved = Vec::with_capacity(statements.len());

        for mut statement in statements {
            match statement.id {
                // full replacement of an existing record
                Some(id) => match self.statements.iter().position(|s| s.id == Some(id)) {
                    Some(index) => self.statements[index] = statement.clone(),
                    None => {
                        self.next_id = self.next_id.max(id + 1);
                        self.statements.push(statement.clone());
                    }
                },
                None => {
                    statement.id = Some(self.next_id);
                    self.next_id += 1;
                    self.statements.push(statement.clone());
                }
            }
            saved.push(statement);
        }

        Ok(saved)
    }

    fn find_all(&self) -> Result<Vec<StatementRecord>, StoreError> {
        Ok(self.statements.clone())
    }

    fn find_by_operation_date_between(
        &self,
        range: &DateRange,
    ) -> Result<Vec<StatementRecord>, StoreError> {
        Ok(filter_statements(&self.statements, range))
    }

    fn find_by_account_number_and_operation_date_between(
        &self,
        account_number: &str,
        range: &DateRange,
    ) -> Result<Vec<StatementRecord>, StoreError> {
        Ok(filter_statements(
            self.statements
                .iter()
                .filter(|s| s.account_number == account_number),
            range,
        ))
    }

    fn exists_by_account_number(&self, account_number: &str) -> Result<bool, StoreError> {
        Ok(self
            .statements
            .iter()
            .any(|s| s.account_number == account_number))
    }
}
