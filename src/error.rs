//! Error types for the Shoply SDK.
//!
//! This module contains the configuration errors raised while building a
//! [`ShoplyConfig`](crate::ShoplyConfig) or a [`ShoplyClient`](crate::ShoplyClient).
//!
//! # Error Handling
//!
//! Configuration errors are returned by constructors and by
//! [`ShoplyClient::set_config`](crate::ShoplyClient::set_config). Failed API
//! calls are reported separately, as
//! [`ShoplyRequestError`](crate::ShoplyRequestError).
//!
//! # Example
//!
//! ```rust
//! use shoply_sdk::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is missing or cannot be parsed.
    #[error("Invalid baseURL '{url}'. Expected format: 'https://api.your-slug.shoply.tld'.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'v1'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClientInit {
        /// Why the client could not be built.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "nope".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("nope"));
        assert!(message.contains("Expected format"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let message = error.to_string();
        assert!(message.contains("base_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidApiVersion {
            version: String::new(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
