use bigdecimal::BigDecimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::utils::decimal;

/// Summary of the transactions recorded in the trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Statistics {
    pub count: u64,
    #[serde(serialize_with = "decimal::serialize")]
    #[schema(value_type = f64, example = 50.75)]
    pub sum: BigDecimal,
    #[serde(serialize_with = "decimal::serialize")]
    #[schema(value_type = f64, example = 12.688)]
    pub avg: BigDecimal,
    #[serde(serialize_with = "decimal::serialize")]
    #[schema(value_type = f64, example = 5.25)]
    pub min: BigDecimal,
    #[serde(serialize_with = "decimal::serialize")]
    #[schema(value_type = f64, example = 20.0)]
    pub max: BigDecimal,
}

impl Statistics {
    /// All-zero statistics reported for an empty window.
    pub fn empty() -> Self {
        Self {
            count: 0,
            sum: BigDecimal::from(0),
            avg: BigDecimal::from(0),
            min: BigDecimal::from(0),
            max: BigDecimal::from(0),
        }
    }
}
