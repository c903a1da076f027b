//! Threshold-based directional alert.

use crate::config::DEFAULT_ALERT_THRESHOLD;
use crate::domain::errors::PipelineError;
use crate::domain::market::{AlertDecision, Direction};

/// Compares predicted vs. current price against a relative-change
/// threshold. Fires BUY on an upward move and SELL on a downward move
/// whose magnitude meets the threshold; `percent_change` is reported
/// either way. The current price must be a positive finite number.
pub fn evaluate(
    current: f64,
    predicted: f64,
    threshold: f64,
) -> Result<AlertDecision, PipelineError> {
    if !current.is_finite() || current <= 0.0 {
        return Err(PipelineError::InvalidPrice { value: current });
    }

    let change = (predicted - current) / current;
    let fired = change.abs() >= threshold;
    let direction = if fired {
        Some(if change > 0.0 {
            Direction::Buy
        } else {
            Direction::Sell
        })
    } else {
        None
    };

    Ok(AlertDecision {
        fired,
        direction,
        percent_change: change * 100.0,
    })
}

/// `evaluate` with the documented 1.5% default threshold.
pub fn evaluate_default(current: f64, predicted: f64) -> Result<AlertDecision, PipelineError> {
    evaluate(current, predicted, DEFAULT_ALERT_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_does_not_fire() {
        let decision = evaluate(100.0, 101.4, 0.015).unwrap();
        assert!(!decision.fired);
        assert_eq!(decision.direction, None);
        assert!((decision.percent_change - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_upward_move_fires_buy() {
        let decision = evaluate(100.0, 102.0, 0.015).unwrap();
        assert!(decision.fired);
        assert_eq!(decision.direction, Some(Direction::Buy));
        assert!((decision.percent_change - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_downward_move_fires_sell() {
        let decision = evaluate(100.0, 98.0, 0.015).unwrap();
        assert!(decision.fired);
        assert_eq!(decision.direction, Some(Direction::Sell));
        assert!((decision.percent_change + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let decision = evaluate(100.0, 101.5, 0.015).unwrap();
        assert!(decision.fired);
        assert_eq!(decision.direction, Some(Direction::Buy));
    }

    #[test]
    fn test_invalid_current_price_is_rejected() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = evaluate(bad, 100.0, 0.015);
            assert!(matches!(result, Err(PipelineError::InvalidPrice { .. })));
        }
    }

    #[test]
    fn test_default_threshold() {
        // 1.4% stays quiet under the 1.5% default, 1.6% fires.
        assert!(!evaluate_default(100.0, 101.4).unwrap().fired);
        assert!(evaluate_default(100.0, 101.6).unwrap().fired);
    }
}
