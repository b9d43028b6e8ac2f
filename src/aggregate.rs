use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::{Result, StatementError};
use crate::statement::StatementRecord;

/// Sums amounts per ISO currency code using exact decimal addition.
pub fn sum_by_currency<'a, I>(statements: I) -> Result<BTreeMap<String, Decimal>>
where
    I: IntoIterator<Item = &'a StatementRecord>,
{
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for statement in statements {
        let total = totals
            .entry(statement.currency.code().to_string())
            .or_insert(Decimal::ZERO);

        *total = total
            .checked_add(statement.amount)
            .ok_or_else(|| StatementError::AmountOverflow {
                currency: statement.currency.code().to_string(),
            })?;
    }

    Ok(totals)
}
