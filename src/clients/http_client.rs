//! Transport adapter for Shoply API communication.
//!
//! [`HttpClient`] owns the reusable network client (connection pool and
//! cookie store). For every call, [`HttpClient::prepare`] turns the effective
//! configuration and resolved credentials into a [`PreparedRequest`], which
//! [`HttpClient::send`] then puts on the wire.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::auth::CredentialSource;
use crate::clients::errors::TransportError;
use crate::clients::http_request::{ApiRequest, HttpMethod};
use crate::clients::http_response::HttpResponse;
use crate::config::ShoplyConfig;
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Whether the SDK runs in a browser-like environment, where the `Origin`
/// header is owned by the runtime.
pub const IS_BROWSER: bool = cfg!(target_arch = "wasm32");

/// Which attempt a prepared request represents.
///
/// This is the retry marker: a request that has been replayed after a token
/// refresh can never be refreshed again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Attempt {
    /// The first attempt.
    #[default]
    Initial,
    /// The single replay after a token refresh.
    Replay,
}

/// A fully resolved request, ready to be sent and, if needed, replayed.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    method: HttpMethod,
    path: String,
    url: String,
    headers: BTreeMap<String, String>,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    timeout: Duration,
    attempt: Attempt,
}

impl PreparedRequest {
    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the path relative to the API root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the full request URL, without the query string.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns a header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Returns the query parameters, defaults first.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns which attempt this request represents.
    #[must_use]
    pub const fn attempt(&self) -> Attempt {
        self.attempt
    }

    /// Replaces the bearer token and marks the request as a replay.
    pub(crate) fn into_replay(mut self, access_token: &str) -> Self {
        self.headers.insert(
            "Authorization".to_string(),
            format!("Bearer {access_token}"),
        );
        self.attempt = Attempt::Replay;
        self
    }
}

/// Reusable HTTP client for the Shoply API.
///
/// The client keeps a cookie store so session cookies set by the server are
/// sent back on later calls. It is rebuilt whenever the global configuration
/// changes.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
    assert_send_sync::<PreparedRequest>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given global configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the underlying client
    /// cannot be created (for example, TLS initialization failure).
    pub fn new(config: &ShoplyConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .cookie_store(true)
            .timeout(config.timeout())
            .user_agent(format!("Shoply SDK v{SDK_VERSION} | Rust"))
            .build()
            .map_err(|e| ConfigError::HttpClientInit {
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// Resolves `request` against the effective configuration and credentials.
    ///
    /// - URL: `{base_url}/sdk/{version}{path}`
    /// - headers: JSON `Content-Type` and `Accept`, `Origin` outside browsers,
    ///   `Authorization: Bearer` when an access token resolves
    /// - query: `lang`, `pricelistId`, `skipTransform`, `userId` when known,
    ///   followed by the request's own parameters
    #[must_use]
    pub fn prepare(
        effective: &ShoplyConfig,
        credentials: &CredentialSource<'_>,
        request: &ApiRequest,
    ) -> PreparedRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        if !IS_BROWSER {
            if let Some(origin) = effective.origin() {
                headers.insert("Origin".to_string(), origin.to_string());
            }
        }

        if let Some(token) = credentials.access_token() {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        let mut query = Vec::new();
        if let Some(lang) = effective.lang() {
            query.push(("lang".to_string(), lang.to_string()));
        }
        if let Some(pricelist_id) = effective.pricelist_id() {
            query.push(("pricelistId".to_string(), pricelist_id.to_string()));
        }
        if effective.skip_transform() {
            query.push(("skipTransform".to_string(), "true".to_string()));
        }
        if let Some(user_id) = credentials.user_id() {
            query.push(("userId".to_string(), user_id));
        }
        query.extend(request.query.iter().cloned());

        PreparedRequest {
            method: request.method,
            path: request.path.clone(),
            url: format!("{}{}", effective.api_root(), request.path),
            headers,
            query,
            body: request.body.clone(),
            timeout: effective.timeout(),
            attempt: Attempt::Initial,
        }
    }

    /// Sends a prepared request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Response`] for a non-2xx response,
    /// [`TransportError::Network`] when no response could be read, and
    /// [`TransportError::Setup`] when the request could not be built.
    pub async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            attempt = ?request.attempt,
            "Sending Shoply API request"
        );

        let mut builder = self
            .client
            .request(request.method.as_reqwest(), &request.url)
            .timeout(request.timeout)
            .query(&request.query);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let res = builder.send().await?;
        let status = res.status().as_u16();
        let text = res
            .text()
            .await
            .map_err(|source| TransportError::Network {
                status: Some(status),
                source,
            })?;

        let response = HttpResponse::from_text(status, &text);
        if response.is_ok() {
            Ok(response)
        } else {
            Err(TransportError::Response(response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionContext;
    use crate::config::{BaseUrl, RequestConfig, ValueGetter};

    fn config() -> ShoplyConfig {
        ShoplyConfig::builder()
            .base_url(BaseUrl::new("https://api.shop.shoply.io/").unwrap())
            .origin("https://shop.example.com")
            .build()
            .unwrap()
    }

    fn prepare(config: &ShoplyConfig, context: &SessionContext, request: &ApiRequest) -> PreparedRequest {
        let effective = config.merged(request.config.as_ref().unwrap_or(&RequestConfig::default()));
        let credentials = CredentialSource::new(config, request.config.as_ref(), context);
        HttpClient::prepare(&effective, &credentials, request)
    }

    #[test]
    fn test_prepare_builds_url_from_base_and_version() {
        let request = ApiRequest::builder(HttpMethod::Get, "/products").build();
        let prepared = prepare(&config(), &SessionContext::default(), &request);

        assert_eq!(prepared.url(), "https://api.shop.shoply.io/sdk/v1/products");
        assert_eq!(prepared.timeout(), Duration::from_millis(10_000));
        assert_eq!(prepared.attempt(), Attempt::Initial);
    }

    #[test]
    fn test_prepare_sets_json_headers_and_origin() {
        let request = ApiRequest::builder(HttpMethod::Get, "/products").build();
        let prepared = prepare(&config(), &SessionContext::default(), &request);

        assert_eq!(prepared.header("Content-Type"), Some("application/json"));
        assert_eq!(prepared.header("Accept"), Some("application/json"));
        assert_eq!(prepared.header("Origin"), Some("https://shop.example.com"));
        assert!(prepared.header("Authorization").is_none());
    }

    #[test]
    fn test_prepare_sets_bearer_from_context() {
        let context = SessionContext {
            access_token: Some("ctx-token".to_string()),
            ..SessionContext::default()
        };
        let request = ApiRequest::builder(HttpMethod::Get, "/users/profile").build();
        let prepared = prepare(&config(), &context, &request);

        assert_eq!(prepared.header("Authorization"), Some("Bearer ctx-token"));
    }

    #[test]
    fn test_prepare_default_query_parameters() {
        let config = ShoplyConfig::builder()
            .base_url(BaseUrl::new("https://api.shop.shoply.io").unwrap())
            .lang("en")
            .pricelist_id("retail")
            .skip_transform(true)
            .user_id_getter(ValueGetter::new(|| Some("user-7".to_string())))
            .build()
            .unwrap();
        let request = ApiRequest::builder(HttpMethod::Get, "/products")
            .query_param("page", "2")
            .build();

        let prepared = prepare(&config, &SessionContext::default(), &request);

        let query: Vec<(&str, &str)> = prepared
            .query()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            query,
            vec![
                ("lang", "en"),
                ("pricelistId", "retail"),
                ("skipTransform", "true"),
                ("userId", "user-7"),
                ("page", "2"),
            ]
        );
    }

    #[test]
    fn test_prepare_omits_unset_query_parameters() {
        let request = ApiRequest::builder(HttpMethod::Get, "/products").build();
        let prepared = prepare(&config(), &SessionContext::default(), &request);

        assert!(prepared.query().is_empty());
    }

    #[test]
    fn test_prepare_applies_per_call_override() {
        let request = ApiRequest::builder(HttpMethod::Get, "/products")
            .config(
                RequestConfig::new()
                    .base_url(BaseUrl::new("https://other.shoply.io").unwrap())
                    .lang("de")
                    .timeout(Duration::from_secs(2)),
            )
            .build();

        let prepared = prepare(&config(), &SessionContext::default(), &request);

        assert_eq!(prepared.url(), "https://other.shoply.io/sdk/v1/products");
        assert_eq!(prepared.timeout(), Duration::from_secs(2));
        assert_eq!(
            prepared.query(),
            &[("lang".to_string(), "de".to_string())]
        );
    }

    #[test]
    fn test_into_replay_rewrites_bearer_and_marks_attempt() {
        let context = SessionContext {
            access_token: Some("old".to_string()),
            ..SessionContext::default()
        };
        let request = ApiRequest::builder(HttpMethod::Get, "/products").build();
        let prepared = prepare(&config(), &context, &request).into_replay("new");

        assert_eq!(prepared.header("Authorization"), Some("Bearer new"));
        assert_eq!(prepared.attempt(), Attempt::Replay);
    }

    #[test]
    fn test_client_construction() {
        assert!(HttpClient::new(&config()).is_ok());
    }
}
