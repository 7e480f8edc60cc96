use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::{Transaction, TransactionRequest};

/// Reasons a candidate transaction is refused, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingFields,
    NonPositiveValue,
    FutureTransaction,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => {
                r#"Fields "id", "value" and "dateTime" are required"#
            }
            ValidationError::NonPositiveValue => "Transaction value must be greater than zero",
            ValidationError::FutureTransaction => "Transaction cannot take place in the future",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks presence, sign and time of a candidate transaction against `now`.
///
/// The first failing check wins. A `value` of zero counts as absent and is
/// reported as `MissingFields`, not `NonPositiveValue`. On success the fields are
/// returned unchanged.
pub fn validate_transaction(
    request: &TransactionRequest,
    now: DateTime<Utc>,
) -> ValidationResult<Transaction> {
    let (id, value, occurred_at) = match (&request.id, &request.value, request.occurred_at) {
        (Some(id), Some(value), Some(occurred_at)) if !id.is_empty() && !value.is_zero() => {
            (id, value, occurred_at)
        }
        _ => return Err(ValidationError::MissingFields),
    };

    validate_positive_value(value)?;
    validate_not_future(occurred_at, now)?;

    Ok(Transaction::new(id.clone(), value.clone(), occurred_at))
}

pub fn validate_positive_value(value: &BigDecimal) -> ValidationResult<()> {
    if value <= &BigDecimal::zero() {
        return Err(ValidationError::NonPositiveValue);
    }

    Ok(())
}

pub fn validate_not_future(occurred_at: DateTime<Utc>, now: DateTime<Utc>) -> ValidationResult<()> {
    if occurred_at > now {
        return Err(ValidationError::FutureTransaction);
    }

    Ok(())
}
