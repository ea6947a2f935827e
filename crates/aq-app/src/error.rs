//! Error types for the aq-app service layer.

use chrono::NaiveDate;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Prediction model unavailable")]
    ModelUnavailable,

    #[error("Historical series unavailable")]
    SeriesUnavailable,

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid filter range: {from} is after {to}")]
    InvalidFilterRange { from: NaiveDate, to: NaiveDate },

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for aq-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<aq_data::ModelError> for AppError {
    fn from(err: aq_data::ModelError) -> Self {
        AppError::Inference(err.to_string())
    }
}

impl From<aq_core::AqError> for AppError {
    fn from(err: aq_core::AqError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
