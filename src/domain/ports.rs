use crate::domain::errors::FetchError;
use crate::domain::market::PriceSeries;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Boundary to the external market data provider.
///
/// A successful call returns the close history for `[start, end]` in
/// ascending date order, or `None` when the provider has nothing for the
/// symbol in that window. There is exactly one call per invocation: no
/// retries, no caching.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<PriceSeries>, FetchError>;
}
