//! Transport-level error types for the Shoply SDK.
//!
//! [`TransportError`] describes how a call failed before normalization. It
//! never reaches SDK callers directly: the response normalizer turns every
//! variant into a [`ShoplyRequestError`](crate::ShoplyRequestError).
//!
//! - [`TransportError::Response`]: the server answered with a non-2xx status
//! - [`TransportError::Network`]: the request was sent but no response came back
//! - [`TransportError::Setup`]: the request could not be built or sent at all

use thiserror::Error;

use crate::clients::HttpResponse;

/// Unified error type for a failed transport call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A non-2xx response was received.
    #[error("Request failed with status {}", .0.status)]
    Response(HttpResponse),

    /// The request was sent but no usable response was received.
    #[error("Network error: {source}")]
    Network {
        /// Status code known for the request, if any.
        status: Option<u16>,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The request was never sent.
    #[error("Request setup failed: {reason}")]
    Setup {
        /// Why the request could not be set up.
        reason: String,
    },
}

impl TransportError {
    /// Returns the HTTP status of a received response, if there is one.
    #[must_use]
    pub const fn response_status(&self) -> Option<u16> {
        match self {
            Self::Response(response) => Some(response.status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            return Self::Setup {
                reason: error.to_string(),
            };
        }

        Self::Network {
            status: error.status().map(|status| status.as_u16()),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_error_message_includes_status() {
        let error = TransportError::Response(HttpResponse::from_text(404, ""));
        assert_eq!(error.to_string(), "Request failed with status 404");
        assert_eq!(error.response_status(), Some(404));
    }

    #[test]
    fn test_setup_error_has_no_response_status() {
        let error = TransportError::Setup {
            reason: "bad header".to_string(),
        };
        assert!(error.to_string().contains("bad header"));
        assert_eq!(error.response_status(), None);
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: &dyn std::error::Error = &TransportError::Setup {
            reason: "x".to_string(),
        };
        let _ = error;
    }
}
