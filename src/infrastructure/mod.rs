pub mod mock;
pub mod prediction_log;
pub mod yahoo;
