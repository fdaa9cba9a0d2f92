//! Request descriptors for the Shoply SDK.
//!
//! An [`ApiRequest`] is a one-shot value describing a single call: method,
//! path, body, query parameters and an optional per-call configuration
//! override. It is consumed by [`ShoplyClient::request`](crate::ShoplyClient::request).

use std::fmt;

use crate::config::RequestConfig;

/// HTTP methods used by the Shoply API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method.
    Get,
    /// HTTP POST method.
    Post,
    /// HTTP PUT method.
    Put,
    /// HTTP PATCH method.
    Patch,
    /// HTTP DELETE method.
    Delete,
}

impl HttpMethod {
    pub(crate) const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single call to the Shoply API.
///
/// Use [`ApiRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use shoply_sdk::clients::{ApiRequest, HttpMethod};
/// use shoply_sdk::RequestConfig;
/// use serde_json::json;
///
/// let request = ApiRequest::builder(HttpMethod::Post, "/cart/add")
///     .body(json!({"productId": "p-1", "quantity": 2}))
///     .config(RequestConfig::new().lang("en"))
///     .build();
///
/// assert_eq!(request.path, "/cart/add");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The path relative to the API root, starting with `/`.
    pub path: String,
    /// The JSON body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters added on top of the default ones.
    pub query: Vec<(String, String)>,
    /// Per-call configuration override.
    pub config: Option<RequestConfig>,
}

impl ApiRequest {
    /// Creates a new builder for constructing an `ApiRequest`.
    ///
    /// A missing leading `/` on `path` is added.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, path)
    }
}

/// Builder for constructing [`ApiRequest`] instances.
#[derive(Debug)]
pub struct ApiRequestBuilder {
    request: ApiRequest,
}

impl ApiRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Self {
            request: ApiRequest {
                method,
                path,
                body: None,
                query: Vec::new(),
                config: None,
            },
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Sets the JSON body when `body` is `Some`.
    #[must_use]
    pub fn maybe_body(mut self, body: Option<serde_json::Value>) -> Self {
        self.request.body = body;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Sets the per-call configuration override.
    #[must_use]
    pub fn config(mut self, config: RequestConfig) -> Self {
        self.request.config = Some(config);
        self
    }

    /// Sets the per-call configuration override when `config` is `Some`.
    #[must_use]
    pub fn maybe_config(mut self, config: Option<RequestConfig>) -> Self {
        self.request.config = config;
        self
    }

    /// Builds the [`ApiRequest`].
    #[must_use]
    pub fn build(self) -> ApiRequest {
        self.request
    }
}
