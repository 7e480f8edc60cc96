//! Transaction domain entity.
//! Framework-agnostic representation of a ledger entry and of the raw request that creates one.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::decimal;

/// A persisted transaction. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: String,
    #[serde(with = "decimal")]
    #[schema(value_type = f64, example = 10.5)]
    pub value: BigDecimal,
    #[serde(rename = "dateTime", alias = "occurredAt")]
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(id: impl Into<String>, value: BigDecimal, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            value,
            occurred_at,
        }
    }
}

/// Candidate transaction as received from a caller. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TransactionRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "decimal::deserialize_option")]
    #[schema(value_type = Option<f64>, example = 10.5)]
    pub value: Option<BigDecimal>,
    #[serde(default, rename = "dateTime", alias = "occurredAt")]
    pub occurred_at: Option<DateTime<Utc>>,
}

impl TransactionRequest {
    pub fn new(id: &str, value: BigDecimal, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: Some(id.to_string()),
            value: Some(value),
            occurred_at: Some(occurred_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn request_accepts_numeric_and_string_values() {
        let from_number: TransactionRequest = serde_json::from_value(json!({
            "id": "tx-1",
            "value": 3.345,
            "dateTime": "2024-05-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(from_number.value, Some(BigDecimal::from_str("3.345").unwrap()));

        let from_string: TransactionRequest = serde_json::from_value(json!({
            "id": "tx-1",
            "value": "12.50",
            "occurredAt": "2024-05-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(from_string.value, Some(BigDecimal::from_str("12.5").unwrap()));
        assert!(from_string.occurred_at.is_some());
    }

    #[test]
    fn request_fields_default_to_absent() {
        let empty: TransactionRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.id.is_none());
        assert!(empty.value.is_none());
        assert!(empty.occurred_at.is_none());

        let nulls: TransactionRequest =
            serde_json::from_value(json!({ "id": null, "value": null, "dateTime": null })).unwrap();
        assert!(nulls.value.is_none());
    }

    #[test]
    fn request_rejects_malformed_fields() {
        assert!(serde_json::from_value::<TransactionRequest>(json!({ "value": "ten" })).is_err());
        assert!(serde_json::from_value::<TransactionRequest>(json!({ "value": true })).is_err());
        assert!(
            serde_json::from_value::<TransactionRequest>(json!({ "dateTime": "yesterday" })).is_err()
        );
        assert!(
            serde_json::from_value::<TransactionRequest>(json!({ "value": "1e-99999999999" }))
                .is_err()
        );
        assert!(serde_json::from_value::<TransactionRequest>(json!({ "value": 1e300 })).is_err());
    }

    #[test]
    fn transaction_serializes_value_as_number() {
        let tx = Transaction::new(
            "tx-7",
            BigDecimal::from_str("10.50").unwrap(),
            DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        );

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["id"], "tx-7");
        assert_eq!(json["value"], 10.5);
        assert_eq!(json["dateTime"], "2024-05-01T12:00:00Z");
    }
}
