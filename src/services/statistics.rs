use bigdecimal::{BigDecimal, Zero};
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::Statistics;
use crate::error::AppError;
use crate::ports::TransactionRepository;
use crate::utils::decimal::round_half_up;

/// Length of the trailing window covered by the statistics.
pub const WINDOW_SECONDS: i64 = 60;

const AMOUNT_PLACES: i64 = 2;
const AVERAGE_PLACES: i64 = 3;

#[derive(Clone)]
pub struct StatisticsService {
    repository: Arc<dyn TransactionRepository>,
}

impl StatisticsService {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }

    /// Statistics over transactions that occurred in `[now - 60s, now]`.
    pub async fn recent_statistics(&self) -> Result<Statistics, AppError> {
        let now = Utc::now();
        let window_start = now - Duration::seconds(WINDOW_SECONDS);

        let values = self.repository.values_between(window_start, now).await?;
        tracing::debug!(count = values.len(), %window_start, %now, "Computing window statistics");

        Ok(summarize(&values))
    }
}

/// Reduces raw values into rounded statistics.
///
/// The average divides the unrounded sum; each field is rounded on its own.
pub fn summarize(values: &[BigDecimal]) -> Statistics {
    let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
        return Statistics::empty();
    };

    let count = values.len() as u64;
    let sum = values.iter().fold(BigDecimal::zero(), |acc, v| acc + v);
    let avg = sum.clone() / BigDecimal::from(count);

    Statistics {
        count,
        sum: round_half_up(&sum, AMOUNT_PLACES),
        avg: round_half_up(&avg, AVERAGE_PLACES),
        min: round_half_up(min, AMOUNT_PLACES),
        max: round_half_up(max, AMOUNT_PLACES),
    }
}
