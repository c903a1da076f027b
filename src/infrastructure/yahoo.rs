//! Yahoo Finance market data client.
//!
//! Talks to the public v8 chart endpoint
//! (`/v8/finance/chart/{symbol}?period1=..&period2=..&interval=1d`) and
//! decodes the daily close series. One request per fetch, bounded
//! timeouts, no retries and no caching.

use crate::domain::errors::FetchError;
use crate::domain::market::{PricePoint, PriceSeries};
use crate::domain::ports::MarketDataSource;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("Mozilla/5.0 (compatible; commodex/0.1)")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    /// Absent entirely for symbols with no trading days in the window.
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    /// Close per timestamp; null on halted/holiday prints.
    close: Option<Vec<Option<f64>>>,
}

/// Pairs timestamps with closes, skipping null or non-finite prints.
fn points_from_result(result: ChartResult) -> Vec<PricePoint> {
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .unwrap_or_default();

    result
        .timestamp
        .unwrap_or_default()
        .into_iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let close = close.filter(|c| c.is_finite())?;
            let date = DateTime::from_timestamp(ts, 0)?.date_naive();
            Some(PricePoint { date, close })
        })
        .collect()
}

#[async_trait]
impl MarketDataSource for YahooClient {
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<PriceSeries>, FetchError> {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        // period2 is exclusive; push to the next midnight so the end date
        // itself is covered.
        let period2 = (end + chrono::Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        debug!(symbol, %url, period1, period2, "requesting chart data");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let payload: ChartResponse = match response.json().await {
            Ok(payload) => payload,
            // Non-2xx responses often carry a chart.error body; when even
            // that fails to parse, surface the status.
            Err(e) if status.is_success() => {
                return Err(FetchError::Decode {
                    symbol: symbol.to_string(),
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                return Err(FetchError::Provider {
                    symbol: symbol.to_string(),
                    message: format!("HTTP {status}"),
                });
            }
        };

        if let Some(err) = payload.chart.error {
            return Err(FetchError::Provider {
                symbol: symbol.to_string(),
                message: format!("{}: {}", err.code, err.description),
            });
        }

        let Some(result) = payload
            .chart
            .result
            .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
        else {
            return Ok(None);
        };

        let points = points_from_result(result);
        if points.is_empty() {
            return Ok(None);
        }

        Ok(Some(PriceSeries::new(symbol, points)))
    }
}
