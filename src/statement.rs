use chrono::NaiveDateTime;
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::StatementError;
use crate::validator;

/// Number of fields in one statement row.
pub const FIELD_COUNT: usize = 6;

/// One bank statement line item.
///
/// `id` stays `None` until a store persists the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    pub id: Option<u64>,
    pub account_number: String,
    pub operation_date: NaiveDateTime,
    pub beneficiary: String,
    pub comment: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: Currency,
}

impl StatementRecord {
    pub fn new(
        account_number: impl Into<String>,
        operation_date: NaiveDateTime,
        beneficiary: impl Into<String>,
        comment: impl Into<String>,
        amount: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            id: None,
            account_number: account_number.into(),
            operation_date,
            beneficiary: beneficiary.into(),
            comment: comment.into(),
            amount,
            currency,
        }
    }
}

/// The six unparsed fields of a data row, in file order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawStatement<'a> {
    pub account_number: &'a str,
    pub operation_date: &'a str,
    pub beneficiary: &'a str,
    pub comment: &'a str,
    pub amount: &'a str,
    pub currency: &'a str,
}

impl<'a> RawStatement<'a> {
    pub fn from_record(record: &'a StringRecord) -> Result<Self, StatementError> {
        if record.len() != FIELD_COUNT {
            return Err(StatementError::format(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                record.len()
            )));
        }

        Ok(Self {
            account_number: &record[0],
            operation_date: &record[1],
            beneficiary: &record[2],
            comment: &record[3],
            amount: &record[4],
            currency: &record[5],
        })
    }
}

impl TryFrom<RawStatement<'_>> for StatementRecord {
    type Error = StatementError;

    fn try_from(raw: RawStatement<'_>) -> Result<Self, Self::Error> {
        let account_number = validator::validate_account_number(raw.account_number)?;
        let operation_date = validator::parse_operation_date(raw.operation_date)?;
        let amount = validator::parse_amount(raw.amount)?;
        let currency = validator::parse_currency(raw.currency)?;

        Ok(StatementRecord::new(
            account_number,
            operation_date,
            raw.beneficiary,
            raw.comment,
            amount,
            currency,
        ))
    }
}
