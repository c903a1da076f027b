//! Straight-line orchestration: fetch, train, predict, alert, log.
//!
//! One invocation owns its series, features and model exclusively; nothing
//! is cached or shared between runs. Only fetch faults are soft (mapped to
//! `Ok(None)` for a "no data" message); every other failure stops the
//! invocation with context.

use crate::application::{alert, model::NextCloseModel};
use crate::config::Config;
use crate::domain::errors::PipelineError;
use crate::domain::market::AlertDecision;
use crate::domain::ports::MarketDataSource;
use crate::infrastructure::prediction_log::PredictionLog;
use chrono::{Duration, NaiveDate, Utc};
use tracing::{error, info, warn};

/// Everything the presentation layer needs for one run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub symbol: String,
    /// Close of the most recent fully-labeled training row.
    pub current: f64,
    pub predicted: f64,
    pub decision: AlertDecision,
}

/// Runs the full pipeline over a trailing `config.lookback_days` window
/// ending today.
pub async fn run(
    source: &dyn MarketDataSource,
    config: &Config,
    symbol: &str,
) -> Result<Option<PipelineOutcome>, PipelineError> {
    let end = Utc::now().date_naive();
    let start = end - Duration::days(config.lookback_days);
    run_window(source, config, symbol, start, end).await
}

pub async fn run_window(
    source: &dyn MarketDataSource,
    config: &Config,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<PipelineOutcome>, PipelineError> {
    info!(symbol, %start, %end, "fetching price history");

    let series = match source.fetch(symbol, start, end).await {
        Ok(Some(series)) if !series.is_empty() => series,
        Ok(_) => {
            info!(symbol, "provider returned no data");
            return Ok(None);
        }
        Err(e) => {
            warn!(symbol, %start, %end, error = %e, "fetch failed, treating as no data");
            return Ok(None);
        }
    };

    info!(symbol, periods = series.len(), "training model");
    let (model, table) = NextCloseModel::train(&series, &config.model)?;
    let predicted = model.predict_next(&table)?;

    let current = table
        .last()
        .map(|row| row.close)
        .ok_or(PipelineError::InsufficientHistory {
            required: crate::application::model::MIN_TRAINING_PERIODS,
            available: series.len(),
        })?;

    let decision = alert::evaluate(current, predicted, config.alert_threshold)?;

    info!(
        symbol,
        current,
        predicted,
        percent_change = decision.percent_change,
        fired = decision.fired,
        "pipeline complete"
    );

    // The log is a best-effort sink; a write failure must not kill the run.
    let log = PredictionLog::new(config.prediction_log.clone());
    if let Err(e) = log.append(Utc::now(), symbol, current, predicted, decision.direction) {
        error!(symbol, error = %e, "failed to append prediction log");
    }

    Ok(Some(PipelineOutcome {
        symbol: symbol.to_string(),
        current,
        predicted,
        decision,
    }))
}
