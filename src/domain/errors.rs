use thiserror::Error;

/// Errors raised while retrieving price history from the market data
/// provider. These never escape the pipeline boundary: the caller converts
/// any of them into the soft "no data" outcome.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error for {symbol}: {message}")]
    Provider { symbol: String, message: String },

    #[error("Malformed payload for {symbol}: {reason}")]
    Decode { symbol: String, reason: String },
}

/// Errors raised by the feature/train/predict/alert pipeline. Unlike
/// fetch faults these are hard failures and stop the invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Insufficient history: need at least {required} priced periods, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Invalid current price: {value}")]
    InvalidPrice { value: f64 },

    #[error("Model training failed: {reason}")]
    Training { reason: String },

    #[error("Prediction failed: {reason}")]
    Prediction { reason: String },
}
