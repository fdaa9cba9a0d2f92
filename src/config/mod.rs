//! Configuration types for the Shoply SDK.
//!
//! Configuration comes in three layers:
//!
//! - [`ShoplyConfig`]: the global configuration owned by a
//!   [`ShoplyClient`](crate::ShoplyClient). Built with [`ShoplyConfigBuilder`];
//!   the base URL is required.
//! - [`ConfigUpdate`]: a partial update applied to the global configuration
//!   through [`ShoplyClient::set_config`](crate::ShoplyClient::set_config).
//! - [`RequestConfig`]: a per-call override. It carries plain values only;
//!   getters and callbacks live for the lifetime of the client.
//!
//! [`ShoplyConfig::merged`] is the resolver that combines the global
//! configuration with a per-call override before every network call.
//!
//! # Example
//!
//! ```rust
//! use shoply_sdk::{ShoplyConfig, BaseUrl, RequestConfig};
//!
//! let config = ShoplyConfig::builder()
//!     .base_url(BaseUrl::new("https://api.my-store.shoply.io").unwrap())
//!     .lang("en")
//!     .build()
//!     .unwrap();
//!
//! let effective = config.merged(&RequestConfig::new().lang("de"));
//! assert_eq!(effective.lang(), Some("de"));
//! assert_eq!(config.lang(), Some("en"));
//! ```

mod newtypes;
mod version;

pub use newtypes::{BaseUrl, ValueGetter};
pub use version::ApiVersion;

pub(crate) use newtypes::redact;

use std::fmt;
use std::time::Duration;

use crate::auth::SessionCallbacks;
use crate::error::ConfigError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Default status code the platform uses to signal an expired access token.
///
/// The platform answers 401 for inactive stores.
pub const DEFAULT_AUTH_EXPIRED_STATUS: u16 = 418;

/// Global configuration for the Shoply SDK.
///
/// # Thread Safety
///
/// `ShoplyConfig` is `Clone`, `Send`, and `Sync`. Getters and callbacks are
/// reference counted, so cloning is cheap.
///
/// # Token Redaction
///
/// The `Debug` implementation masks explicit access and refresh tokens.
#[derive(Clone, PartialEq)]
pub struct ShoplyConfig {
    base_url: BaseUrl,
    version: ApiVersion,
    origin: Option<String>,
    timeout: Duration,
    lang: Option<String>,
    skip_transform: bool,
    pricelist_id: Option<String>,
    user_id: Option<String>,
    user_id_getter: Option<ValueGetter>,
    access_token: Option<String>,
    access_token_getter: Option<ValueGetter>,
    refresh_token: Option<String>,
    refresh_token_getter: Option<ValueGetter>,
    callbacks: SessionCallbacks,
    auth_expired_status: u16,
}

impl ShoplyConfig {
    /// Creates a new builder for constructing a `ShoplyConfig`.
    #[must_use]
    pub fn builder() -> ShoplyConfigBuilder {
        ShoplyConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn version(&self) -> &ApiVersion {
        &self.version
    }

    /// Returns the API root, `{base_url}/sdk/{version}`.
    #[must_use]
    pub fn api_root(&self) -> String {
        self.base_url.api_root(&self.version.to_string())
    }

    /// Returns the `Origin` header value, if configured.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the language, if configured.
    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// Returns whether multilanguage fields should be left untransformed.
    #[must_use]
    pub const fn skip_transform(&self) -> bool {
        self.skip_transform
    }

    /// Returns the pricelist id, if configured.
    #[must_use]
    pub fn pricelist_id(&self) -> Option<&str> {
        self.pricelist_id.as_deref()
    }

    /// Returns the explicit user id, if configured.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns the user id getter, if configured.
    #[must_use]
    pub const fn user_id_getter(&self) -> Option<&ValueGetter> {
        self.user_id_getter.as_ref()
    }

    /// Returns the explicit access token, if configured.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the access token getter, if configured.
    #[must_use]
    pub const fn access_token_getter(&self) -> Option<&ValueGetter> {
        self.access_token_getter.as_ref()
    }

    /// Returns the explicit refresh token, if configured.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns the refresh token getter, if configured.
    #[must_use]
    pub const fn refresh_token_getter(&self) -> Option<&ValueGetter> {
        self.refresh_token_getter.as_ref()
    }

    /// Returns the lifecycle callbacks.
    #[must_use]
    pub const fn callbacks(&self) -> &SessionCallbacks {
        &self.callbacks
    }

    /// Returns the status code that signals an expired access token.
    #[must_use]
    pub const fn auth_expired_status(&self) -> u16 {
        self.auth_expired_status
    }

    /// Produces the effective configuration for a single call.
    ///
    /// Fields set on `overrides` win; unset fields keep the global value.
    /// Neither input is modified, and merging the same override twice yields
    /// the same result as merging it once.
    #[must_use]
    pub fn merged(&self, overrides: &RequestConfig) -> Self {
        let mut effective = self.clone();

        if let Some(base_url) = &overrides.base_url {
            effective.base_url = base_url.clone();
        }
        if let Some(version) = &overrides.version {
            effective.version = version.clone();
        }
        if let Some(timeout) = overrides.timeout {
            effective.timeout = timeout;
        }
        if let Some(skip_transform) = overrides.skip_transform {
            effective.skip_transform = skip_transform;
        }
        override_field(&mut effective.origin, &overrides.origin);
        override_field(&mut effective.lang, &overrides.lang);
        override_field(&mut effective.pricelist_id, &overrides.pricelist_id);
        override_field(&mut effective.access_token, &overrides.access_token);
        override_field(&mut effective.refresh_token, &overrides.refresh_token);

        effective
    }

    /// Applies a partial update to this configuration in place.
    pub(crate) fn apply(&mut self, update: ConfigUpdate) {
        let ConfigUpdate {
            base_url,
            version,
            origin,
            timeout,
            lang,
            skip_transform,
            pricelist_id,
            user_id,
            user_id_getter,
            access_token,
            access_token_getter,
            refresh_token,
            refresh_token_getter,
            auth_expired_status,
        } = update;

        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(version) = version {
            self.version = version;
        }
        if let Some(timeout) = timeout {
            self.timeout = timeout;
        }
        if let Some(skip_transform) = skip_transform {
            self.skip_transform = skip_transform;
        }
        if let Some(status) = auth_expired_status {
            self.auth_expired_status = status;
        }
        replace_field(&mut self.origin, origin);
        replace_field(&mut self.lang, lang);
        replace_field(&mut self.pricelist_id, pricelist_id);
        replace_field(&mut self.user_id, user_id);
        replace_field(&mut self.user_id_getter, user_id_getter);
        replace_field(&mut self.access_token, access_token);
        replace_field(&mut self.access_token_getter, access_token_getter);
        replace_field(&mut self.refresh_token, refresh_token);
        replace_field(&mut self.refresh_token_getter, refresh_token_getter);
    }

    pub(crate) fn set_callbacks(&mut self, callbacks: SessionCallbacks) {
        self.callbacks = callbacks;
    }
}

fn override_field<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

fn replace_field<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

impl fmt::Debug for ShoplyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShoplyConfig")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("origin", &self.origin)
            .field("timeout", &self.timeout)
            .field("lang", &self.lang)
            .field("skip_transform", &self.skip_transform)
            .field("pricelist_id", &self.pricelist_id)
            .field("user_id", &self.user_id)
            .field("user_id_getter", &self.user_id_getter)
            .field("access_token", &redact(self.access_token.as_ref()))
            .field("access_token_getter", &self.access_token_getter)
            .field("refresh_token", &redact(self.refresh_token.as_ref()))
            .field("refresh_token_getter", &self.refresh_token_getter)
            .field("callbacks", &self.callbacks)
            .field("auth_expired_status", &self.auth_expired_status)
            .finish()
    }
}

// Verify ShoplyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShoplyConfig>();
};

/// Builder for constructing [`ShoplyConfig`] instances.
///
/// The only required field is `base_url`.
///
/// # Defaults
///
/// - `version`: [`ApiVersion::V1`]
/// - `timeout`: [`DEFAULT_TIMEOUT`] (10 seconds)
/// - `skip_transform`: `false`
/// - `auth_expired_status`: [`DEFAULT_AUTH_EXPIRED_STATUS`]
/// - everything else: unset
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use shoply_sdk::{ShoplyConfig, BaseUrl, ValueGetter};
///
/// let config = ShoplyConfig::builder()
///     .base_url(BaseUrl::new("https://api.my-store.shoply.io").unwrap())
///     .timeout(Duration::from_secs(5))
///     .pricelist_id("wholesale")
///     .access_token_getter(ValueGetter::new(|| std::env::var("SHOPLY_TOKEN").ok()))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Default)]
pub struct ShoplyConfigBuilder {
    base_url: Option<BaseUrl>,
    version: Option<ApiVersion>,
    origin: Option<String>,
    timeout: Option<Duration>,
    lang: Option<String>,
    skip_transform: bool,
    pricelist_id: Option<String>,
    user_id: Option<String>,
    user_id_getter: Option<ValueGetter>,
    access_token: Option<String>,
    access_token_getter: Option<ValueGetter>,
    refresh_token: Option<String>,
    refresh_token_getter: Option<ValueGetter>,
    callbacks: SessionCallbacks,
    auth_expired_status: Option<u16>,
}

impl ShoplyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn version(mut self, version: ApiVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Sets the `Origin` header sent outside browser environments.
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the language for requests.
    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Requests untransformed multilanguage fields.
    #[must_use]
    pub const fn skip_transform(mut self, skip: bool) -> Self {
        self.skip_transform = skip;
        self
    }

    /// Sets the pricelist id.
    #[must_use]
    pub fn pricelist_id(mut self, id: impl Into<String>) -> Self {
        self.pricelist_id = Some(id.into());
        self
    }

    /// Sets an explicit user id for cart operations.
    #[must_use]
    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    /// Sets a getter for the user id.
    #[must_use]
    pub fn user_id_getter(mut self, getter: ValueGetter) -> Self {
        self.user_id_getter = Some(getter);
        self
    }

    /// Sets an explicit access token.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets a getter for the access token.
    #[must_use]
    pub fn access_token_getter(mut self, getter: ValueGetter) -> Self {
        self.access_token_getter = Some(getter);
        self
    }

    /// Sets an explicit refresh token.
    #[must_use]
    pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Sets a getter for the refresh token.
    #[must_use]
    pub fn refresh_token_getter(mut self, getter: ValueGetter) -> Self {
        self.refresh_token_getter = Some(getter);
        self
    }

    /// Sets the lifecycle callbacks.
    #[must_use]
    pub fn callbacks(mut self, callbacks: SessionCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Sets the status code that signals an expired access token.
    #[must_use]
    pub const fn auth_expired_status(mut self, status: u16) -> Self {
        self.auth_expired_status = Some(status);
        self
    }

    /// Builds the [`ShoplyConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<ShoplyConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(ShoplyConfig {
            base_url,
            version: self.version.unwrap_or_default(),
            origin: self.origin,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            lang: self.lang,
            skip_transform: self.skip_transform,
            pricelist_id: self.pricelist_id,
            user_id: self.user_id,
            user_id_getter: self.user_id_getter,
            access_token: self.access_token,
            access_token_getter: self.access_token_getter,
            refresh_token: self.refresh_token,
            refresh_token_getter: self.refresh_token_getter,
            callbacks: self.callbacks,
            auth_expired_status: self
                .auth_expired_status
                .unwrap_or(DEFAULT_AUTH_EXPIRED_STATUS),
        })
    }
}

/// A partial update to the global configuration.
///
/// Unset fields leave the current value untouched.
///
/// # Example
///
/// ```rust
/// use shoply_sdk::ConfigUpdate;
///
/// let update = ConfigUpdate::new().lang("fr").pricelist_id("retail");
/// assert_eq!(update.lang.as_deref(), Some("fr"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigUpdate {
    /// New base URL.
    pub base_url: Option<BaseUrl>,
    /// New API version.
    pub version: Option<ApiVersion>,
    /// New `Origin` header value.
    pub origin: Option<String>,
    /// New timeout.
    pub timeout: Option<Duration>,
    /// New language.
    pub lang: Option<String>,
    /// New skip-transform flag.
    pub skip_transform: Option<bool>,
    /// New pricelist id.
    pub pricelist_id: Option<String>,
    /// New explicit user id.
    pub user_id: Option<String>,
    /// New user id getter.
    pub user_id_getter: Option<ValueGetter>,
    /// New explicit access token.
    pub access_token: Option<String>,
    /// New access token getter.
    pub access_token_getter: Option<ValueGetter>,
    /// New explicit refresh token.
    pub refresh_token: Option<String>,
    /// New refresh token getter.
    pub refresh_token_getter: Option<ValueGetter>,
    /// New expired-token status code.
    pub auth_expired_status: Option<u16>,
}

impl ConfigUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Updates the API version.
    #[must_use]
    pub fn version(mut self, version: ApiVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Updates the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Updates the language.
    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Updates the pricelist id.
    #[must_use]
    pub fn pricelist_id(mut self, id: impl Into<String>) -> Self {
        self.pricelist_id = Some(id.into());
        self
    }

    /// Updates the explicit access token.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Updates the explicit refresh token.
    #[must_use]
    pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Updates the explicit user id.
    #[must_use]
    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }
}

/// A per-call configuration override.
///
/// Every field is optional. Getters and callbacks are not available here;
/// they belong to the global configuration.
///
/// # Example
///
/// ```rust
/// use shoply_sdk::RequestConfig;
///
/// let overrides = RequestConfig::new().lang("de").skip_transform(true);
/// assert_eq!(overrides.skip_transform, Some(true));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestConfig {
    /// Base URL for this call.
    pub base_url: Option<BaseUrl>,
    /// API version for this call.
    pub version: Option<ApiVersion>,
    /// `Origin` header for this call.
    pub origin: Option<String>,
    /// Timeout for this call.
    pub timeout: Option<Duration>,
    /// Language for this call.
    pub lang: Option<String>,
    /// Skip-transform flag for this call.
    pub skip_transform: Option<bool>,
    /// Pricelist id for this call.
    pub pricelist_id: Option<String>,
    /// Access token for this call.
    pub access_token: Option<String>,
    /// Refresh token for this call.
    pub refresh_token: Option<String>,
}

impl RequestConfig {
    /// Creates an empty override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the language.
    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Overrides the skip-transform flag.
    #[must_use]
    pub const fn skip_transform(mut self, skip: bool) -> Self {
        self.skip_transform = Some(skip);
        self
    }

    /// Overrides the pricelist id.
    #[must_use]
    pub fn pricelist_id(mut self, id: impl Into<String>) -> Self {
        self.pricelist_id = Some(id.into());
        self
    }

    /// Overrides the access token.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Overrides the refresh token.
    #[must_use]
    pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ShoplyConfig {
        ShoplyConfig::builder()
            .base_url(BaseUrl::new("https://api.shop.shoply.io").unwrap())
            .lang("en")
            .pricelist_id("retail")
            .access_token("global-token")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ShoplyConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ShoplyConfig::builder()
            .base_url(BaseUrl::new("https://api.shop.shoply.io").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.version(), &ApiVersion::V1);
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.auth_expired_status(), 418);
        assert!(!config.skip_transform());
        assert!(config.origin().is_none());
        assert!(config.access_token().is_none());
        assert_eq!(config.api_root(), "https://api.shop.shoply.io/sdk/v1");
    }

    #[test]
    fn test_merge_override_wins_field_by_field() {
        let config = base_config();
        let overrides = RequestConfig::new().lang("de").timeout(Duration::from_secs(1));

        let effective = config.merged(&overrides);

        assert_eq!(effective.lang(), Some("de"));
        assert_eq!(effective.timeout(), Duration::from_secs(1));
        assert_eq!(effective.pricelist_id(), Some("retail"));
        assert_eq!(effective.access_token(), Some("global-token"));
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let config = base_config();
        let overrides = RequestConfig::new().lang("de").access_token("call-token");
        let before = overrides.clone();

        let _ = config.merged(&overrides);

        assert_eq!(config.lang(), Some("en"));
        assert_eq!(config.access_token(), Some("global-token"));
        assert_eq!(overrides, before);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let config = base_config();
        let overrides = RequestConfig::new()
            .lang("de")
            .skip_transform(true)
            .base_url(BaseUrl::new("https://other.shoply.io").unwrap());

        let once = config.merged(&overrides);
        let twice = once.merged(&overrides);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_override_is_identity() {
        let config = base_config();
        assert_eq!(config.merged(&RequestConfig::default()), config);
    }

    #[test]
    fn test_apply_update_keeps_unset_fields() {
        let mut config = base_config();
        config.apply(ConfigUpdate::new().lang("fr").user_id("user-1"));

        assert_eq!(config.lang(), Some("fr"));
        assert_eq!(config.user_id(), Some("user-1"));
        assert_eq!(config.pricelist_id(), Some("retail"));
        assert_eq!(config.access_token(), Some("global-token"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = ShoplyConfig::builder()
            .base_url(BaseUrl::new("https://api.shop.shoply.io").unwrap())
            .access_token("super-secret-access")
            .refresh_token("super-secret-refresh")
            .build()
            .unwrap();

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("ShoplyConfig"));
        assert!(!debug_output.contains("super-secret-access"));
        assert!(!debug_output.contains("super-secret-refresh"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShoplyConfig>();
    }
}
