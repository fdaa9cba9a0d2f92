//! The Shoply SDK entry point.

use serde::de::DeserializeOwned;

use crate::auth::{
    ContextUpdate, CredentialSource, SessionCallbacks, SessionContext, SessionStore,
};
use crate::clients::{normalize, ApiRequest, AuthRefresh, HttpClient, ShoplyResult};
use crate::config::{ConfigUpdate, ShoplyConfig};
use crate::error::ConfigError;
use crate::resources::{CartResource, OrdersResource, UsersResource};

/// Client for the Shoply storefront API.
///
/// A client owns its global configuration, its transport and its session
/// context. Calls to resource methods resolve credentials from the per-call
/// override, the global configuration, the configured getters and finally
/// the session context, in that order.
///
/// # Thread Safety
///
/// `ShoplyClient` is `Send + Sync`. Share it between tasks behind an `Arc`;
/// configuration changes through [`set_config`](Self::set_config) require
/// exclusive access.
///
/// # Example
///
/// ```rust,no_run
/// use shoply_sdk::{BaseUrl, ShoplyClient, ShoplyConfig};
/// use shoply_sdk::resources::LoginUserRequest;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ShoplyConfig::builder()
///     .base_url(BaseUrl::new("https://api.my-store.shoply.io")?)
///     .lang("en")
///     .build()?;
/// let client = ShoplyClient::new(config)?;
///
/// let login = client
///     .users()
///     .login(LoginUserRequest::new("ana@example.com", "secret"), None)
///     .await?;
/// println!("logged in as {}", login.user.name);
///
/// let response = client.cart().get(None).await?;
/// println!("{} items in cart", response.cart.item_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ShoplyClient {
    config: ShoplyConfig,
    transport: HttpClient,
    session: SessionStore,
}

// Verify ShoplyClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShoplyClient>();
};

impl ShoplyClient {
    /// Creates a client with an empty session context.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the transport cannot be
    /// created.
    pub fn new(config: ShoplyConfig) -> Result<Self, ConfigError> {
        let transport = HttpClient::new(&config)?;
        tracing::debug!(base_url = %config.base_url(), version = %config.version(), "Shoply client created");

        Ok(Self {
            config,
            transport,
            session: SessionStore::new(),
        })
    }

    /// Merges `update` into the global configuration and rebuilds the
    /// transport.
    ///
    /// Fields left unset on `update` keep their current values. The session
    /// context is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the transport cannot be
    /// rebuilt. The configuration is left unchanged in that case.
    pub fn set_config(&mut self, update: ConfigUpdate) -> Result<(), ConfigError> {
        let mut config = self.config.clone();
        config.apply(update);
        let transport = HttpClient::new(&config)?;

        self.config = config;
        self.transport = transport;
        tracing::debug!(base_url = %self.config.base_url(), "Shoply configuration updated");
        Ok(())
    }

    /// Replaces the lifecycle callbacks.
    pub fn set_callbacks(&mut self, callbacks: SessionCallbacks) {
        self.config.set_callbacks(callbacks);
    }

    /// Returns the current global configuration.
    #[must_use]
    pub const fn config(&self) -> &ShoplyConfig {
        &self.config
    }

    /// Returns a snapshot of the session context.
    #[must_use]
    pub fn context(&self) -> SessionContext {
        self.session.snapshot()
    }

    /// User registration, login and profile calls.
    #[must_use]
    pub const fn users(&self) -> UsersResource<'_> {
        UsersResource::new(self)
    }

    /// Cart calls.
    #[must_use]
    pub const fn cart(&self) -> CartResource<'_> {
        CartResource::new(self)
    }

    /// Order calls.
    #[must_use]
    pub const fn orders(&self) -> OrdersResource<'_> {
        OrdersResource::new(self)
    }

    /// Sends any request through the SDK pipeline and decodes the response's
    /// `data` into `T`.
    ///
    /// The request goes through configuration merging, credential resolution,
    /// the expired-token refresh and response normalization, exactly like the
    /// resource methods. The session context is not updated.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) for every
    /// failed call; see [`normalize`](crate::clients::normalize).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use shoply_sdk::clients::{ApiRequest, HttpMethod};
    ///
    /// let request = ApiRequest::builder(HttpMethod::Get, "/categories").build();
    /// let categories: Vec<serde_json::Value> = client.request(request).await?;
    /// ```
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> ShoplyResult<T> {
        let effective = request
            .config
            .as_ref()
            .map_or_else(|| self.config.clone(), |overrides| self.config.merged(overrides));
        let context = self.session.snapshot();
        let credentials = CredentialSource::new(&self.config, request.config.as_ref(), &context);
        let prepared = HttpClient::prepare(&effective, &credentials, &request);

        let interceptor = AuthRefresh::new(
            &self.transport,
            &self.session,
            self.config.callbacks(),
            effective.auth_expired_status(),
        );
        // The refresh token is read when the expiry arrives; a concurrent
        // refresh may have rotated it since the request was prepared.
        let outcome = interceptor
            .send(&effective, prepared, || {
                let live = self.session.snapshot();
                CredentialSource::new(&self.config, request.config.as_ref(), &live)
                    .refresh_token()
            })
            .await;

        let result = normalize(outcome);
        if let Err(error) = &result {
            tracing::warn!(
                method = %request.method,
                path = %request.path,
                status = error.status,
                "Shoply request failed: {}",
                error.message
            );
        }
        result
    }

    /// Merges `update` into the session context and fires the callbacks.
    pub(crate) fn commit(&self, update: ContextUpdate) {
        self.session.commit(update, self.config.callbacks());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;
    use std::time::Duration;

    fn config() -> ShoplyConfig {
        ShoplyConfig::builder()
            .base_url(BaseUrl::new("https://api.shop.shoply.io").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_client_has_empty_context() {
        let client = ShoplyClient::new(config()).unwrap();
        assert_eq!(client.context(), SessionContext::default());
    }

    #[test]
    fn test_set_config_merges_into_global() {
        let mut client = ShoplyClient::new(config()).unwrap();
        client
            .set_config(ConfigUpdate::new().lang("de").timeout(Duration::from_secs(3)))
            .unwrap();

        assert_eq!(client.config().lang(), Some("de"));
        assert_eq!(client.config().timeout(), Duration::from_secs(3));
        assert_eq!(client.config().base_url().as_ref(), "https://api.shop.shoply.io");
    }

    #[test]
    fn test_set_callbacks_replaces_slots() {
        let mut client = ShoplyClient::new(config()).unwrap();
        assert!(client.config().callbacks().on_cart.is_none());

        client.set_callbacks(SessionCallbacks::new().on_cart(|_| {}));
        assert!(client.config().callbacks().on_cart.is_some());
    }

    #[test]
    fn test_commit_updates_context() {
        let client = ShoplyClient::new(config()).unwrap();
        client.commit(ContextUpdate {
            user_id: crate::auth::FieldUpdate::Set("u-1".to_string()),
            ..ContextUpdate::default()
        });

        assert_eq!(client.context().user_id.as_deref(), Some("u-1"));
    }
}
