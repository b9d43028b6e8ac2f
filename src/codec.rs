//! Row codec for the fixed six-column statement CSV.
//!
//! Output is written without quoting or escaping, so a comma inside
//! `beneficiary` or `comment` shifts the columns of the exported row.

use csv::{QuoteStyle, StringRecord, Terminator, WriterBuilder};
use std::io::Write;

use crate::error::{Result, StatementError};
use crate::statement::{RawStatement, StatementRecord};
use crate::validator::OPERATION_DATE_FORMAT;

pub const HEADER: [&str; 6] = [
    "account_number",
    "operation_date",
    "beneficiary",
    "comment",
    "amount",
    "currency",
];

/// Decodes and validates one data row.
pub fn decode_row(record: &StringRecord) -> Result<StatementRecord> {
    let raw = RawStatement::from_record(record)?;
    StatementRecord::try_from(raw)
}

/// Encodes one statement in column order.
pub fn encode_row(statement: &StatementRecord) -> [String; 6] {
    [
        statement.account_number.clone(),
        statement
            .operation_date
            .format(OPERATION_DATE_FORMAT)
            .to_string(),
        statement.beneficiary.clone(),
        statement.comment.clone(),
        statement.amount.to_string(),
        statement.currency.to_string(),
    ]
}

/// Writes the header followed by one line per statement.
pub fn encode<W: Write>(writer: W, statements: &[StatementRecord]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER).map_err(generate_error)?;
    for statement in statements {
        wtr.write_record(encode_row(statement))
            .map_err(generate_error)?;
    }
    wtr.flush().map_err(|e| StatementError::GenerateCsv {
        message: e.to_string(),
    })?;

    Ok(())
}

pub fn encode_to_string(statements: &[StatementRecord]) -> Result<String> {
    let mut buf = Vec::new();
    encode(&mut buf, statements)?;

    String::from_utf8(buf).map_err(|e| StatementError::GenerateCsv {
        message: e.to_string(),
    })
}

fn generate_error(e: csv::Error) -> StatementError {
    StatementError::GenerateCsv {
        message: e.to_string(),
    }
}
