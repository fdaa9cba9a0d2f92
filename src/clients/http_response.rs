//! HTTP response type for the Shoply SDK.

/// A response received from the Shoply API.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The parsed body. `Null` for an empty body, a JSON string for a body
    /// that is not valid JSON.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a response from a status code and raw body text.
    #[must_use]
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(text)
                .unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
        };

        Self { status, body }
    }

    /// Returns `true` for a 2xx status.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns `true` if the body carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.body {
            serde_json::Value::Null => true,
            serde_json::Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the body's `message` field when it is a non-empty string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|message| !message.is_empty())
    }

    /// Returns the body's `data` field, if any.
    #[must_use]
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.body.get("data").filter(|data| !data.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_text_parses_json() {
        let response = HttpResponse::from_text(200, r#"{"data":{"foo":"bar"}}"#);
        assert_eq!(response.body, json!({"data": {"foo": "bar"}}));
        assert_eq!(response.data(), Some(&json!({"foo": "bar"})));
    }

    #[test]
    fn test_from_text_empty_body_is_null() {
        let response = HttpResponse::from_text(204, "");
        assert!(response.body.is_null());
        assert!(response.is_empty());
    }

    #[test]
    fn test_from_text_keeps_non_json_body_as_string() {
        let response = HttpResponse::from_text(502, "<html>Bad Gateway</html>");
        assert_eq!(response.body, json!("<html>Bad Gateway</html>"));
        assert!(!response.is_empty());
        assert!(response.message().is_none());
    }

    #[test]
    fn test_is_ok_range() {
        assert!(HttpResponse::from_text(200, "").is_ok());
        assert!(HttpResponse::from_text(299, "").is_ok());
        assert!(!HttpResponse::from_text(300, "").is_ok());
        assert!(!HttpResponse::from_text(418, "").is_ok());
    }

    #[test]
    fn test_message_only_for_strings() {
        let response = HttpResponse::from_text(400, r#"{"message":42}"#);
        assert!(response.message().is_none());

        let response = HttpResponse::from_text(400, r#"{"message":"Bad input"}"#);
        assert_eq!(response.message(), Some("Bad input"));
    }

    #[test]
    fn test_empty_message_is_ignored() {
        let response = HttpResponse::from_text(400, r#"{"message":""}"#);
        assert!(response.message().is_none());
    }
}
