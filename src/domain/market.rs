use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single daily observation: closing price keyed by calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Historical close series for one symbol, ordered ascending by date.
///
/// Produced by a market data source and consumed read-only by the
/// pipeline. Dates are unique; duplicates from the provider are collapsed
/// to the first occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }
}

/// Derived indicators for one date. Exists only where every trailing
/// window is fully populated; partial rows are dropped, never imputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: NaiveDate,
    /// Fractional day-over-day change of the close.
    pub ret: f64,
    /// Trailing 5-period mean close, inclusive of the current row.
    pub ma_5: f64,
    /// Trailing 20-period mean close.
    pub ma_20: f64,
    /// Trailing 5-period sample standard deviation of the close.
    pub volatility: f64,
}

impl FeatureRow {
    /// Flattens the row into model input order.
    pub fn feature_vector(&self) -> Vec<f64> {
        vec![self.ret, self.ma_5, self.ma_20, self.volatility]
    }
}

/// One labeled training example: features for a date, the close on that
/// date, and the next observed close as the regression target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingRow {
    pub features: FeatureRow,
    pub close: f64,
    pub target: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
        }
    }
}

/// Outcome of comparing predicted vs. current price against a threshold.
/// `percent_change` is populated whether or not the alert fired so callers
/// can always display magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertDecision {
    pub fired: bool,
    pub direction: Option<Direction>,
    pub percent_change: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_series_sorted_on_construction() {
        let series = PriceSeries::new(
            "GC=F",
            vec![
                PricePoint {
                    date: date(3),
                    close: 3.0,
                },
                PricePoint {
                    date: date(1),
                    close: 1.0,
                },
                PricePoint {
                    date: date(2),
                    close: 2.0,
                },
            ],
        );

        let dates: Vec<_> = series.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
        assert_eq!(series.last_close(), Some(3.0));
    }

    #[test]
    fn test_series_deduplicates_dates() {
        let series = PriceSeries::new(
            "GC=F",
            vec![
                PricePoint {
                    date: date(1),
                    close: 1.0,
                },
                PricePoint {
                    date: date(1),
                    close: 9.0,
                },
            ],
        );
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Buy.to_string(), "BUY");
        assert_eq!(Direction::Sell.to_string(), "SELL");
    }

    #[test]
    fn test_feature_vector_order() {
        let row = FeatureRow {
            date: date(1),
            ret: 0.1,
            ma_5: 5.0,
            ma_20: 20.0,
            volatility: 0.5,
        };
        assert_eq!(row.feature_vector(), vec![0.1, 5.0, 20.0, 0.5]);
    }
}
