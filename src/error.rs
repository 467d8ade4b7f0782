use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("input has no data rows (expected a header line plus at least one record line)")]
    EmptyInput,

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "prediction-api")]
    #[error("prediction API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[cfg(feature = "prediction-api")]
    #[error("prediction API returned status {status}: {body}")]
    ApiStatus { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
