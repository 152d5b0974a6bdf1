//! Common error types used across all pollchart crates
//! Provides consistent error handling and reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Series shapes the scale calculator cannot lay out normally
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegenerateSeries {
    #[error("series is empty")]
    Empty,

    #[error("series has a single point")]
    SinglePoint,

    #[error("series values have zero variance")]
    ZeroVariance,

    #[error("series has no numeric values")]
    NoNumericValues,

    /// Spread or axis range does not fit in an `f64`
    #[error("series values span a range too large or too small to lay out")]
    Unrepresentable,
}

/// Base error type for all pollchart operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum ChartError {
    #[error("Network request failed for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Data parse error: {message}")]
    Parse { message: String },

    #[error("Degenerate series: {0}")]
    Degenerate(#[from] DegenerateSeries),

    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    #[error("Element not found: {id}")]
    ElementNotFound { id: String },
}

impl ChartError {
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        ChartError::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        ChartError::Parse {
            message: message.into(),
        }
    }

    pub fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        ChartError::InvalidConfig {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Parse {
            message: err.to_string(),
        }
    }
}

/// Result type alias for pollchart operations
pub type ChartResult<T> = Result<T, ChartError>;
