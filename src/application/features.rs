//! Rolling indicator derivation over a close series.
//!
//! Four indicators per row: day-over-day return, 5- and 20-period trailing
//! means, and 5-period sample standard deviation. Rows whose windows are
//! not fully populated are dropped, so the first output row sits at input
//! offset 19.

use crate::domain::market::{FeatureRow, PricePoint, PriceSeries};

pub const SHORT_WINDOW: usize = 5;
pub const LONG_WINDOW: usize = 20;

/// Derives the feature table from a price series. Pure: the input is not
/// mutated. Inputs shorter than the longest window yield an empty table,
/// which downstream treats as "cannot train".
pub fn add_features(series: &PriceSeries) -> Vec<FeatureRow> {
    let points = &series.points;
    if points.len() < LONG_WINDOW {
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(points.len() - (LONG_WINDOW - 1));
    for t in (LONG_WINDOW - 1)..points.len() {
        let prev = points[t - 1].close;
        let ret = (points[t].close - prev) / prev;

        rows.push(FeatureRow {
            date: points[t].date,
            ret,
            ma_5: trailing_mean(points, t, SHORT_WINDOW),
            ma_20: trailing_mean(points, t, LONG_WINDOW),
            volatility: trailing_std(points, t, SHORT_WINDOW),
        });
    }
    rows
}

fn window(points: &[PricePoint], t: usize, len: usize) -> &[PricePoint] {
    &points[t + 1 - len..=t]
}

fn trailing_mean(points: &[PricePoint], t: usize, len: usize) -> f64 {
    let w = window(points, t, len);
    w.iter().map(|p| p.close).sum::<f64>() / w.len() as f64
}

/// Sample standard deviation (n - 1 denominator), matching the pandas
/// rolling-std convention the original analysis used.
fn trailing_std(points: &[PricePoint], t: usize, len: usize) -> f64 {
    let w = window(points, t, len);
    let n = w.len() as f64;
    let mean = w.iter().map(|p| p.close).sum::<f64>() / n;
    let sum_sq: f64 = w.iter().map(|p| (p.close - mean).powi(2)).sum();
    (sum_sq / (n - 1.0)).sqrt()
}
