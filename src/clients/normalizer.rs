//! Response normalization into the uniform SDK result.
//!
//! Every call made through the SDK ends in [`normalize`], which turns the
//! transport outcome into a [`ShoplyResult`]. Callers never see transport
//! details: all failures become a [`ShoplyRequestError`] carrying a status,
//! a human-readable message and, when the server sent one, its `data`.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::clients::errors::TransportError;
use crate::clients::http_response::HttpResponse;

/// Message used when the server failed to execute the request or answered
/// with something the SDK cannot use.
pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong and Shoply servers have failed to execute SDK request! Please check your configuration, dashboard and server availability, and try again later.";

/// Message used when the request was sent but no response came back.
pub const CLIENT_ERROR_MESSAGE: &str = "An error has occurred and your request could not reach Shoply servers! Please check your internet connection and request configuration, and try again.";

/// Message used when the request could not be set up and was never sent.
pub const CONFIG_ERROR_MESSAGE: &str = "An error has occurred in setting up the request and the request was not sent to Shoply servers! Please check your configuration and our documentation!";

/// Message the server sends, with a 401 status, for a disabled store.
pub const STORE_INACTIVE_MESSAGE: &str = "This store is not active!";

/// The uniform error returned by every SDK call.
///
/// # Example
///
/// ```rust
/// use shoply_sdk::ShoplyRequestError;
///
/// let error = ShoplyRequestError::new(404, "Product not found");
/// assert_eq!(error.to_string(), "Shoply request failed with status 404: Product not found");
/// assert!(!error.is_inactive);
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
#[error("Shoply request failed with status {status}: {message}")]
pub struct ShoplyRequestError {
    /// HTTP status of the failure, `500` when none is known.
    pub status: u16,
    /// Human-readable description.
    pub message: String,
    /// The `data` field of the error response body, if any.
    pub data: Option<serde_json::Value>,
    /// Whether the failure means the store is not active.
    pub is_inactive: bool,
}

impl ShoplyRequestError {
    /// Creates an error without data.
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            is_inactive: is_inactive(status, &message),
            status,
            message,
            data: None,
        }
    }

    fn server_error() -> Self {
        Self::new(500, SERVER_ERROR_MESSAGE)
    }
}

/// Result type of every SDK call.
pub type ShoplyResult<T> = Result<T, ShoplyRequestError>;

fn is_inactive(status: u16, message: &str) -> bool {
    status == 401 && message == STORE_INACTIVE_MESSAGE
}

/// Converts a transport outcome into the uniform SDK result.
///
/// - 2xx with a body: the body's `data` decoded into `T`
/// - 2xx without a body, or a `data` that does not decode: server error
/// - error response: its status, `message` and `data`
/// - no response: client error, with the request status when known
/// - request never sent: configuration error
///
/// # Errors
///
/// Returns a [`ShoplyRequestError`] for every outcome other than a
/// decodable 2xx response.
pub fn normalize<T: DeserializeOwned>(
    outcome: Result<HttpResponse, TransportError>,
) -> ShoplyResult<T> {
    match outcome {
        Ok(response) => decode(response),
        Err(error) => Err(from_transport(error)),
    }
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> ShoplyResult<T> {
    if !response.is_ok() || response.is_empty() {
        return Err(ShoplyRequestError::server_error());
    }

    let data = response
        .body
        .get("data")
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    serde_json::from_value(data).map_err(|error| {
        tracing::warn!(error = %error, "Response data does not match the expected shape");
        ShoplyRequestError::server_error()
    })
}

fn from_transport(error: TransportError) -> ShoplyRequestError {
    match error {
        TransportError::Response(response) => {
            let message = response.message().unwrap_or(SERVER_ERROR_MESSAGE).to_string();
            ShoplyRequestError {
                is_inactive: is_inactive(response.status, &message),
                data: response.data().cloned(),
                status: response.status,
                message,
            }
        }
        TransportError::Network { status, .. } => {
            ShoplyRequestError::new(status.unwrap_or(500), CLIENT_ERROR_MESSAGE)
        }
        TransportError::Setup { .. } => ShoplyRequestError::new(500, CONFIG_ERROR_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Flag {
        ok: bool,
    }

    fn response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse { status, body }
    }

    #[test]
    fn test_success_returns_data() {
        let result: ShoplyResult<Flag> =
            normalize(Ok(response(200, json!({"data": {"ok": true}}))));
        assert_eq!(result, Ok(Flag { ok: true }));
    }

    #[test]
    fn test_success_without_data_field_decodes_none() {
        let result: ShoplyResult<Option<Flag>> = normalize(Ok(response(200, json!({}))));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_empty_success_body_is_server_error() {
        let result: ShoplyResult<Flag> = normalize(Ok(HttpResponse::from_text(200, "")));
        let error = result.unwrap_err();
        assert_eq!(error.status, 500);
        assert_eq!(error.message, SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn test_undecodable_data_is_server_error() {
        let result: ShoplyResult<Flag> =
            normalize(Ok(response(200, json!({"data": {"ok": "yes"}}))));
        assert_eq!(result.unwrap_err(), ShoplyRequestError::new(500, SERVER_ERROR_MESSAGE));
    }

    #[test]
    fn test_non_success_response_on_success_path_is_server_error() {
        let result: ShoplyResult<Flag> =
            normalize(Ok(response(304, json!({"data": {"ok": true}}))));
        assert_eq!(result.unwrap_err().status, 500);
    }

    #[test]
    fn test_error_response_keeps_status_message_and_data() {
        let result: ShoplyResult<Flag> = normalize(Err(TransportError::Response(response(
            422,
            json!({"message": "Quantity too high", "data": {"max": 3}}),
        ))));

        let error = result.unwrap_err();
        assert_eq!(error.status, 422);
        assert_eq!(error.message, "Quantity too high");
        assert_eq!(error.data, Some(json!({"max": 3})));
        assert!(!error.is_inactive);
    }

    #[test]
    fn test_error_response_without_message_uses_server_error() {
        let result: ShoplyResult<Flag> = normalize(Err(TransportError::Response(
            HttpResponse::from_text(503, "<html>Unavailable</html>"),
        )));

        let error = result.unwrap_err();
        assert_eq!(error.status, 503);
        assert_eq!(error.message, SERVER_ERROR_MESSAGE);
        assert!(error.data.is_none());
    }

    #[test]
    fn test_error_response_with_empty_message_uses_server_error() {
        let result: ShoplyResult<Flag> = normalize(Err(TransportError::Response(response(
            400,
            json!({"message": "", "data": {"field": "email"}}),
        ))));

        let error = result.unwrap_err();
        assert_eq!(error.status, 400);
        assert_eq!(error.message, SERVER_ERROR_MESSAGE);
        assert_eq!(error.data, Some(json!({"field": "email"})));
    }

    #[test]
    fn test_inactive_store_is_flagged() {
        let result: ShoplyResult<Flag> = normalize(Err(TransportError::Response(response(
            401,
            json!({"message": STORE_INACTIVE_MESSAGE}),
        ))));

        let error = result.unwrap_err();
        assert_eq!(error.status, 401);
        assert!(error.is_inactive);
    }

    #[test]
    fn test_other_unauthorized_is_not_inactive() {
        let result: ShoplyResult<Flag> = normalize(Err(TransportError::Response(response(
            401,
            json!({"message": "Invalid credentials"}),
        ))));
        assert!(!result.unwrap_err().is_inactive);
    }

    #[test]
    fn test_setup_error_uses_config_message() {
        let result: ShoplyResult<Flag> = normalize(Err(TransportError::Setup {
            reason: "invalid header".to_string(),
        }));

        let error = result.unwrap_err();
        assert_eq!(error.status, 500);
        assert_eq!(error.message, CONFIG_ERROR_MESSAGE);
    }

    #[test]
    fn test_display_includes_status_and_message() {
        let error = ShoplyRequestError::new(400, "Bad request");
        assert_eq!(
            error.to_string(),
            "Shoply request failed with status 400: Bad request"
        );
    }
}
