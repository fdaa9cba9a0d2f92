//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A validated base URL for the Shoply API.
///
/// The URL must parse, use the `http` or `https` scheme, and carry a host.
/// A trailing slash is stripped so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use shoply_sdk::BaseUrl;
///
/// let url = BaseUrl::new("https://api.my-store.shoply.io/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.my-store.shoply.io");
/// assert_eq!(url.api_root("v1"), "https://api.my-store.shoply.io/sdk/v1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is empty, cannot be
    /// parsed, is not http(s), or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();

        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|_| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(trimmed.trim_end_matches('/').to_string()))
    }

    /// Returns the API root: the base URL followed by `/sdk/{version}`.
    #[must_use]
    pub fn api_root(&self, version: &str) -> String {
        format!("{}/sdk/{version}", self.0)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A function producing a value on demand, such as a token read from
/// an external store.
///
/// Getters are invoked with no arguments each time the value is needed.
/// Returning `None` (or an empty string) lets resolution fall through to the
/// next source.
///
/// Two getters compare equal only when they wrap the same function instance.
///
/// # Example
///
/// ```rust
/// use shoply_sdk::ValueGetter;
///
/// let getter = ValueGetter::new(|| Some("token-from-store".to_string()));
/// assert_eq!(getter.get(), Some("token-from-store".to_string()));
/// ```
#[derive(Clone)]
pub struct ValueGetter(Arc<dyn Fn() -> Option<String> + Send + Sync>);

impl ValueGetter {
    /// Wraps a function as a getter.
    pub fn new<F>(getter: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(getter))
    }

    /// Invokes the getter.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        (self.0)()
    }
}

impl PartialEq for ValueGetter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ValueGetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueGetter(..)")
    }
}

/// Formats an optional token without revealing it.
pub(crate) fn redact(token: Option<&String>) -> &'static str {
    match token {
        Some(_) => "Some(*****)",
        None => "None",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://api.shop.shoply.io/").unwrap();
        assert_eq!(url.as_ref(), "https://api.shop.shoply.io");

        let url = BaseUrl::new("http://localhost:3000").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:3000");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("").is_err());
        assert!(BaseUrl::new("api.shop.shoply.io").is_err());
        assert!(BaseUrl::new("ftp://api.shop.shoply.io").is_err());
        assert!(BaseUrl::new("https://").is_err());
    }

    #[test]
    fn test_base_url_api_root() {
        let url = BaseUrl::new("https://api.shop.shoply.io/").unwrap();
        assert_eq!(url.api_root("v1"), "https://api.shop.shoply.io/sdk/v1");
    }

    #[test]
    fn test_base_url_deserialize_validates() {
        let url: BaseUrl = serde_json::from_str(r#""https://api.shop.shoply.io/""#).unwrap();
        assert_eq!(url.as_ref(), "https://api.shop.shoply.io");

        let result: Result<BaseUrl, _> = serde_json::from_str(r#""nope""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_value_getter_equality_is_identity() {
        let getter = ValueGetter::new(|| Some("a".to_string()));
        let same = getter.clone();
        let other = ValueGetter::new(|| Some("a".to_string()));

        assert_eq!(getter, same);
        assert_ne!(getter, other);
        assert_eq!(format!("{getter:?}"), "ValueGetter(..)");
    }
}
