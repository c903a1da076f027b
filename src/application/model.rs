//! Next-close regression model.
//!
//! A random forest is fitted from scratch on every invocation and
//! discarded afterwards: no persistence, no reuse across runs. The seed is
//! fixed so a given series and configuration always produce the same
//! forest.

use crate::application::features::{self, LONG_WINDOW};
use crate::config::ModelConfig;
use crate::domain::errors::PipelineError;
use crate::domain::market::{PriceSeries, TrainingRow};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::debug;

/// Shortest series that yields at least one labeled training row: the
/// longest rolling window plus one period for the shifted target.
pub const MIN_TRAINING_PERIODS: usize = LONG_WINDOW + 1;

pub struct NextCloseModel {
    forest: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
}

impl NextCloseModel {
    /// Builds the training table (target = next close, final row dropped)
    /// and fits the forest on the entire available history. The table is
    /// returned alongside the model because prediction needs its last row.
    pub fn train(
        series: &PriceSeries,
        config: &ModelConfig,
    ) -> Result<(Self, Vec<TrainingRow>), PipelineError> {
        let feature_rows = features::add_features(series);

        let mut table = Vec::with_capacity(feature_rows.len().saturating_sub(1));
        for (i, row) in feature_rows.iter().enumerate() {
            let point_idx = (LONG_WINDOW - 1) + i;
            // The final date has no next close; that row is dropped.
            if let Some(next) = series.points.get(point_idx + 1) {
                table.push(TrainingRow {
                    features: *row,
                    close: series.points[point_idx].close,
                    target: next.close,
                });
            }
        }

        if table.is_empty() {
            return Err(PipelineError::InsufficientHistory {
                required: MIN_TRAINING_PERIODS,
                available: series.len(),
            });
        }

        let x: Vec<Vec<f64>> = table.iter().map(|r| r.features.feature_vector()).collect();
        let y: Vec<f64> = table.iter().map(|r| r.target).collect();

        let x_matrix = DenseMatrix::from_2d_vec(&x).map_err(|e| PipelineError::Training {
            reason: format!("matrix construction failed: {e}"),
        })?;

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(config.n_trees.into())
            .with_seed(config.seed);

        debug!(
            samples = table.len(),
            n_trees = config.n_trees,
            seed = config.seed,
            "fitting random forest"
        );

        let forest = RandomForestRegressor::fit(&x_matrix, &y, params).map_err(|e| {
            PipelineError::Training {
                reason: e.to_string(),
            }
        })?;

        Ok((Self { forest }, table))
    }

    /// Applies the forest to the most recent training row's features and
    /// returns the scalar next-close estimate.
    pub fn predict_next(&self, table: &[TrainingRow]) -> Result<f64, PipelineError> {
        let last = table.last().ok_or_else(|| PipelineError::Prediction {
            reason: "empty training table".to_string(),
        })?;

        let input = DenseMatrix::from_2d_vec(&vec![last.features.feature_vector()]).map_err(
            |e| PipelineError::Prediction {
                reason: format!("matrix construction failed: {e}"),
            },
        )?;

        let predictions = self
            .forest
            .predict(&input)
            .map_err(|e| PipelineError::Prediction {
                reason: e.to_string(),
            })?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| PipelineError::Prediction {
                reason: "no prediction returned".to_string(),
            })
    }
}
