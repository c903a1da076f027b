//! End-to-end pipeline tests over the mock data source.

use commodex::application::pipeline;
use commodex::config::{Config, ModelConfig};
use commodex::domain::errors::PipelineError;
use commodex::infrastructure::mock::{MockBehavior, MockMarketDataSource, synthetic_series};
use std::path::PathBuf;

fn test_config(prediction_log: PathBuf) -> Config {
    Config {
        alert_threshold: 0.015,
        lookback_days: 180,
        prediction_log,
        yahoo_base_url: "http://unused.invalid".to_string(),
        model: ModelConfig {
            n_trees: 20,
            seed: 42,
        },
    }
}

fn scratch_log() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("predictions_log.csv");
    (dir, path)
}

#[tokio::test]
async fn happy_path_produces_outcome_and_log_line() {
    let (_dir, log_path) = scratch_log();
    let config = test_config(log_path.clone());
    let series = synthetic_series("GC=F", 90);
    // Last labeled training row is the penultimate point.
    let expected_current = series.points[series.len() - 2].close;
    let source = MockMarketDataSource::with_series(series);

    let outcome = pipeline::run(&source, &config, "GC=F")
        .await
        .expect("pipeline should succeed")
        .expect("mock source has data");

    assert_eq!(outcome.symbol, "GC=F");
    assert_eq!(outcome.current, expected_current);
    assert!(outcome.predicted.is_finite());
    assert!(outcome.decision.percent_change.is_finite());

    let contents = std::fs::read_to_string(&log_path).expect("log file written");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    let fields: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[1], "GC=F");
}

#[tokio::test]
async fn empty_result_is_soft_no_data() {
    let (_dir, log_path) = scratch_log();
    let config = test_config(log_path.clone());
    let source = MockMarketDataSource::new(MockBehavior::Empty);

    let outcome = pipeline::run(&source, &config, "ZZ=F").await.unwrap();
    assert!(outcome.is_none());
    assert!(!log_path.exists(), "no log entry on the no-data path");
}

#[tokio::test]
async fn fetch_failure_is_soft_no_data() {
    let (_dir, log_path) = scratch_log();
    let config = test_config(log_path);
    let source =
        MockMarketDataSource::new(MockBehavior::Fail("connection reset by peer".to_string()));

    let outcome = pipeline::run(&source, &config, "GC=F").await.unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
async fn short_history_is_a_hard_failure() {
    let (_dir, log_path) = scratch_log();
    let config = test_config(log_path);
    let source = MockMarketDataSource::with_series(synthetic_series("GC=F", 12));

    let result = pipeline::run(&source, &config, "GC=F").await;
    assert!(matches!(
        result,
        Err(PipelineError::InsufficientHistory { available: 12, .. })
    ));
}

#[tokio::test]
async fn identical_inputs_give_identical_predictions() {
    let (_dir_a, log_a) = scratch_log();
    let (_dir_b, log_b) = scratch_log();
    let series = synthetic_series("SI=F", 120);

    let source_a = MockMarketDataSource::with_series(series.clone());
    let source_b = MockMarketDataSource::with_series(series);

    let outcome_a = pipeline::run(&source_a, &test_config(log_a), "SI=F")
        .await
        .unwrap()
        .unwrap();
    let outcome_b = pipeline::run(&source_b, &test_config(log_b), "SI=F")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(outcome_a.predicted.to_bits(), outcome_b.predicted.to_bits());
    assert_eq!(outcome_a.decision, outcome_b.decision);
}
