//! Error types for SDK configuration.
//!
//! Errors raised while talking to the service live in
//! [`clients`](crate::clients); this module only covers failures that happen
//! while building a [`ChatAiConfig`](crate::ChatAiConfig).
//!
//! # Example
//!
//! ```rust
//! use chatai_sdk::{ConfigError, Endpoint};
//!
//! let result = Endpoint::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyEndpoint)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Endpoint cannot be empty.
    #[error("Endpoint cannot be empty. Please provide the base URL of the ChatAI service.")]
    EmptyEndpoint,

    /// Endpoint is not a valid absolute URL.
    #[error("Invalid endpoint '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.example.com').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The default HTTP transport could not be created.
    #[error("Failed to initialize HTTP transport: {reason}")]
    TransportInit {
        /// Why the underlying client could not be built.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_endpoint_error_message() {
        let message = ConfigError::EmptyEndpoint.to_string();
        assert!(message.contains("Endpoint cannot be empty"));
    }

    #[test]
    fn test_invalid_endpoint_error_message() {
        let error = ConfigError::InvalidEndpoint {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("valid URL with scheme"));
    }

    #[test]
    fn test_transport_init_error_message() {
        let error = ConfigError::TransportInit {
            reason: "tls backend unavailable".to_string(),
        };
        assert!(error.to_string().contains("tls backend unavailable"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyEndpoint;
        let _: &dyn std::error::Error = &error;
    }
}
