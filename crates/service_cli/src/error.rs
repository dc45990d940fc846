//! Error types for the optpricer CLI.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pricing library rejected the request
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Command-line argument out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Output serialisation failed
    #[error("Serialisation error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::invalid_argument("negative range");
        assert!(err.to_string().contains("negative range"));

        let err: CliError = PricingError::UnknownModel("bermudan".to_string()).into();
        assert!(matches!(err, CliError::Pricing(_)));
        assert!(err.to_string().contains("bermudan"));
    }
}
