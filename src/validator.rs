//! Per-field checks applied to every imported row.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::error;

use crate::currency::Currency;
use crate::error::{Result, StatementError};

/// Wire format of `operation_date`, both on import and export.
pub const OPERATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const OPERATION_DATE_LENGTH: usize = "yyyy-MM-dd HH:mm:ss".len();

pub fn validate_account_number(raw: &str) -> Result<&str> {
    if raw.is_empty() {
        error!("Account number is empty.");
        return Err(StatementError::format("account number must not be empty"));
    }
    Ok(raw)
}

pub fn parse_operation_date(raw: &str) -> Result<NaiveDateTime> {
    // chrono accepts single-digit fields, the wire format does not
    if raw.len() != OPERATION_DATE_LENGTH {
        error!("Operation date has unexpected length: {}", raw);
        return Err(StatementError::format(format!(
            "operation date '{}' does not match yyyy-MM-dd HH:mm:ss",
            raw
        )));
    }

    NaiveDateTime::parse_from_str(raw, OPERATION_DATE_FORMAT).map_err(|e| {
        error!("Operation date is invalid: {}", e);
        StatementError::format(format!("operation date '{}': {}", raw, e))
    })
}

/// Parses a plain decimal: optional sign, digits, optional fraction.
///
/// Exponents, digit separators and digits beyond the representable scale
/// are rejected rather than rounded.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    if !is_plain_decimal(raw) {
        error!("Amount is not a plain decimal: {}", raw);
        return Err(StatementError::format(format!(
            "amount '{}' is not a plain decimal",
            raw
        )));
    }

    let amount = Decimal::from_str_exact(raw).map_err(|e| {
        error!("Amount is not a decimal: {}", raw);
        StatementError::format(format!("amount '{}': {}", raw, e))
    })?;

    validate_amount(amount)?;
    Ok(amount)
}

fn is_plain_decimal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(whole) && fraction.map_or(true, digits)
}

pub fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        error!("Importing amount is not positive: {}", amount);
        return Err(StatementError::InvalidAmount(amount));
    }
    Ok(())
}

pub fn parse_currency(raw: &str) -> Result<Currency> {
    raw.parse::<Currency>().inspect_err(|_| {
        error!("Unknown currency code: {}", raw);
    })
}
