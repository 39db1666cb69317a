//! Error types for vatcal.

use thiserror::Error;

use crate::region::Region;

/// Errors that can occur in vatcal operations.
#[derive(Error, Debug)]
pub enum VatcalError {
    #[error("Failed to fetch events: {0}")]
    Fetch(String),

    #[error("No event data available for region {0}")]
    NoDataAvailable(Region),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for VatcalError {
    fn from(err: reqwest::Error) -> Self {
        VatcalError::Fetch(err.to_string())
    }
}

/// Result type alias for vatcal operations.
pub type VatcalResult<T> = Result<T, VatcalError>;
