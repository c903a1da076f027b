//! Configuration for the commodity predictor.
//!
//! All runtime knobs come from environment variables with sensible
//! defaults, so the binaries run out of the box. The commodity catalog is
//! static data exposed through an accessor rather than a mutable global.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.015;
pub const DEFAULT_LOOKBACK_DAYS: i64 = 180;
const DEFAULT_PREDICTION_LOG: &str = "predictions_log.csv";
const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_MODEL_TREES: u16 = 100;
const DEFAULT_MODEL_SEED: u64 = 42;

/// Random forest hyperparameters. The seed is fixed so identical inputs
/// produce identical models within a run of the same configuration.
#[derive(Debug, Clone, Copy)]
pub struct ModelConfig {
    pub n_trees: u16,
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_MODEL_TREES,
            seed: DEFAULT_MODEL_SEED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Relative-change cutoff for firing an alert (fraction, not percent).
    pub alert_threshold: f64,
    /// Trailing fetch window in calendar days, ending today.
    pub lookback_days: i64,
    /// Append-only prediction log destination.
    pub prediction_log: PathBuf,
    /// Market data provider base URL; overridable for tests.
    pub yahoo_base_url: String,
    pub model: ModelConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let alert_threshold = env::var("ALERT_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_ALERT_THRESHOLD.to_string())
            .parse::<f64>()
            .context("Invalid ALERT_THRESHOLD, expected a fraction like 0.015")?;
        anyhow::ensure!(
            alert_threshold.is_finite() && alert_threshold >= 0.0,
            "ALERT_THRESHOLD must be a non-negative finite number, got {alert_threshold}"
        );

        let lookback_days = env::var("LOOKBACK_DAYS")
            .unwrap_or_else(|_| DEFAULT_LOOKBACK_DAYS.to_string())
            .parse::<i64>()
            .context("Invalid LOOKBACK_DAYS, expected a positive integer")?;
        anyhow::ensure!(
            lookback_days > 0,
            "LOOKBACK_DAYS must be positive, got {lookback_days}"
        );

        let prediction_log = PathBuf::from(
            env::var("PREDICTION_LOG").unwrap_or_else(|_| DEFAULT_PREDICTION_LOG.to_string()),
        );

        let yahoo_base_url =
            env::var("YAHOO_BASE_URL").unwrap_or_else(|_| DEFAULT_YAHOO_BASE_URL.to_string());

        let n_trees = env::var("MODEL_TREES")
            .unwrap_or_else(|_| DEFAULT_MODEL_TREES.to_string())
            .parse::<u16>()
            .context("Invalid MODEL_TREES, expected a positive integer")?;
        anyhow::ensure!(n_trees > 0, "MODEL_TREES must be positive");

        let seed = env::var("MODEL_SEED")
            .unwrap_or_else(|_| DEFAULT_MODEL_SEED.to_string())
            .parse::<u64>()
            .context("Invalid MODEL_SEED, expected an integer")?;

        Ok(Self {
            alert_threshold,
            lookback_days,
            prediction_log,
            yahoo_base_url,
            model: ModelConfig { n_trees, seed },
        })
    }
}

/// Display name shown in the dashboard and the Yahoo Finance futures code
/// behind it. Grouped by sector: metals, energy, grains, softs, livestock.
pub fn commodity_catalog() -> &'static [(&'static str, &'static str)] {
    &[
        // Precious & industrial metals
        ("Gold", "GC=F"),
        ("Silver", "SI=F"),
        ("Copper", "HG=F"),
        ("Platinum", "PL=F"),
        ("Palladium", "PA=F"),
        // Energy
        ("Crude Oil WTI", "CL=F"),
        ("Crude Oil Brent", "BZ=F"),
        ("Natural Gas", "NG=F"),
        ("Gasoline", "RB=F"),
        ("Heating Oil", "HO=F"),
        // Grains
        ("Corn", "ZC=F"),
        ("Wheat", "ZW=F"),
        ("Soybeans", "ZS=F"),
        ("Oats", "ZO=F"),
        ("Rough Rice", "ZR=F"),
        // Softs
        ("Coffee", "KC=F"),
        ("Cocoa", "CC=F"),
        ("Sugar", "SB=F"),
        ("Cotton", "CT=F"),
        ("Orange Juice", "OJ=F"),
        // Livestock
        ("Live Cattle", "LE=F"),
        ("Feeder Cattle", "GF=F"),
        ("Lean Hogs", "HE=F"),
    ]
}

/// Dashboard selection before the user picks anything.
pub const DEFAULT_COMMODITY: (&str, &str) = ("Gold", "GC=F");

pub fn ticker_for(name: &str) -> Option<&'static str> {
    commodity_catalog()
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, t)| *t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_all_commodities() {
        assert_eq!(commodity_catalog().len(), 23);
    }

    #[test]
    fn test_catalog_tickers_unique() {
        let tickers: HashSet<_> = commodity_catalog().iter().map(|(_, t)| *t).collect();
        assert_eq!(tickers.len(), commodity_catalog().len());
    }

    #[test]
    fn test_default_commodity_is_in_catalog() {
        assert_eq!(ticker_for(DEFAULT_COMMODITY.0), Some(DEFAULT_COMMODITY.1));
    }

    #[test]
    fn test_ticker_lookup() {
        assert_eq!(ticker_for("Crude Oil WTI"), Some("CL=F"));
        assert_eq!(ticker_for("Dogecoin"), None);
    }

    #[test]
    fn test_model_config_defaults() {
        let model = ModelConfig::default();
        assert_eq!(model.n_trees, 100);
        assert_eq!(model.seed, 42);
    }
}
