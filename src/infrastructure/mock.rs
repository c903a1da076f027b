//! Deterministic in-memory data source for tests.

use crate::domain::errors::FetchError;
use crate::domain::market::{PricePoint, PriceSeries};
use crate::domain::ports::MarketDataSource;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

/// What the mock should do when asked for data.
pub enum MockBehavior {
    /// Return this series regardless of the requested window.
    Series(PriceSeries),
    /// Provider reachable but empty: the "absent result" path.
    Empty,
    /// Simulated provider fault.
    Fail(String),
}

pub struct MockMarketDataSource {
    behavior: MockBehavior,
}

impl MockMarketDataSource {
    pub fn new(behavior: MockBehavior) -> Self {
        Self { behavior }
    }

    pub fn with_series(series: PriceSeries) -> Self {
        Self::new(MockBehavior::Series(series))
    }
}

#[async_trait]
impl MarketDataSource for MockMarketDataSource {
    async fn fetch(
        &self,
        symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Option<PriceSeries>, FetchError> {
        match &self.behavior {
            MockBehavior::Series(series) => Ok(Some(series.clone())),
            MockBehavior::Empty => Ok(None),
            MockBehavior::Fail(message) => Err(FetchError::Provider {
                symbol: symbol.to_string(),
                message: message.clone(),
            }),
        }
    }
}

/// Builds a deterministic daily series: a mild upward drift with a fixed
/// oscillation, all closes positive.
pub fn synthetic_series(symbol: &str, len: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let points = (0..len)
        .map(|i| PricePoint {
            date: start + Duration::days(i as i64),
            close: 100.0 + i as f64 * 0.3 + (i as f64 * 0.7).sin() * 2.0,
        })
        .collect();
    PriceSeries::new(symbol, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_series_shape() {
        let series = synthetic_series("TEST", 40);
        assert_eq!(series.len(), 40);
        assert!(series.points.iter().all(|p| p.close > 0.0));
        assert!(series.points.windows(2).all(|w| w[0].date < w[1].date));
    }
}
