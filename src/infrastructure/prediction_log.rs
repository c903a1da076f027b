//! Append-only prediction log.
//!
//! One positional, comma-separated line per invocation: timestamp, symbol,
//! actual price, predicted price, signal. No header row, no schema
//! versioning; the file is created on first use.

use crate::domain::market::Direction;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    timestamp: String,
    symbol: &'a str,
    actual: f64,
    predicted: f64,
    signal: &'a str,
}

pub struct PredictionLog {
    path: PathBuf,
}

impl PredictionLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(
        &self,
        timestamp: DateTime<Utc>,
        symbol: &str,
        actual: f64,
        predicted: f64,
        direction: Option<Direction>,
    ) -> Result<(), csv::Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let signal = match direction {
            Some(Direction::Buy) => "BUY",
            Some(Direction::Sell) => "SELL",
            None => "NONE",
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.serialize(LogRecord {
            timestamp: timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            symbol,
            actual,
            predicted,
            signal,
        })?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_append_writes_headerless_positional_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions_log.csv");
        let log = PredictionLog::new(path.clone());

        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        log.append(ts, "GC=F", 2300.5, 2340.25, Some(Direction::Buy))
            .unwrap();
        log.append(ts, "SI=F", 27.1, 27.2, None).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "2024-06-01 12:30:00,GC=F,2300.5,2340.25,BUY");
        assert_eq!(lines[1], "2024-06-01 12:30:00,SI=F,27.1,27.2,NONE");
    }

    #[test]
    fn test_append_creates_file_on_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.csv");
        assert!(!path.exists());

        let log = PredictionLog::new(path.clone());
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        log.append(ts, "CL=F", 80.0, 78.0, Some(Direction::Sell))
            .unwrap();

        assert!(path.exists());
    }
}
